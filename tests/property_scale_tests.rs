use proptest::prelude::*;
use vchart_rs::core::{LinearScale, OrdinalScale};

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        range_end in 1.0f64..4096.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new((domain_start, domain_end), (range_end, 0.0))
            .expect("valid scale");
        let px = scale.map(value);
        let recovered = scale.invert(px).expect("invertible");

        prop_assert!(px >= -1e-9 && px <= range_end + 1e-9);
        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn ticks_are_ascending_and_inside_domain(
        lo in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        count in 2usize..12
    ) {
        let hi = lo + span;
        let scale = LinearScale::new((lo, hi), (0.0, 100.0)).expect("valid scale");
        let ticks = scale.ticks(count);

        prop_assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        let slack = span * 1e-9;
        for tick in &ticks {
            prop_assert!(*tick >= lo - slack && *tick <= hi + slack);
        }
    }

    #[test]
    fn ordinal_scale_returns_first_position_of_each_label(
        labels in proptest::collection::vec(0u8..5, 1..30)
    ) {
        let domain: Vec<Option<String>> =
            labels.iter().map(|label| Some(format!("c{label}"))).collect();
        let range: Vec<f64> = (0..domain.len()).map(|i| i as f64 * 10.0).collect();
        let scale = OrdinalScale::new(domain.clone(), range).expect("valid scale");

        for label in &domain {
            let first = domain.iter().position(|other| other == label).expect("present");
            prop_assert_eq!(scale.map(label.as_deref()).expect("known"), first as f64 * 10.0);
        }
    }
}
