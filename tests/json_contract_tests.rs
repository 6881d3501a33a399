use std::time::Duration;

use vchart_rs::api::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
use vchart_rs::core::{ChartSpec, ChartType, MetricKeys};
use vchart_rs::{ChartError, ChartHost, ChartHostConfig, ChartSnapshot, NullDecorator};

const SPEC_JSON: &str = r##"{
    "selector": "sales-chart",
    "chartType": "vBarChart",
    "width": 220,
    "height": 220,
    "data": [
        {"month": "Jan", "total": 3, "net": 1},
        {"month": "Feb", "total": "7", "net": 2}
    ],
    "metric": ["total", "net"],
    "dim": "month",
    "goal": 5,
    "legends": {"enabled": true},
    "title": "Sales",
    "overrides": {"palette": {"fill": "#34495e"}, "y": {"ticks": 3}}
}"##;

fn mounted_snapshot() -> ChartSnapshot {
    let spec = ChartSpec::from_json_str(SPEC_JSON).expect("spec json");
    let mut host = ChartHost::new(
        NullDecorator,
        ChartHostConfig::new().with_transition_duration(Duration::ZERO),
    );
    host.mount(spec).expect("mount");
    host.snapshot().expect("snapshot")
}

#[test]
fn spec_json_uses_host_field_names() {
    let spec = ChartSpec::from_json_str(SPEC_JSON).expect("spec json");

    assert_eq!(spec.selector, "sales-chart");
    assert_eq!(spec.chart_type, ChartType::VerticalBar);
    assert_eq!(
        spec.metric,
        MetricKeys::Many(vec!["total".to_owned(), "net".to_owned()])
    );
    assert_eq!(spec.dim.as_deref(), Some("month"));
    assert_eq!(spec.goal, Some(5.0));
    assert!(spec.legends_enabled());
    assert_eq!(spec.subtitle, None);

    let single = ChartSpec::from_json_str(r#"{"selector": "c", "chartType": "pieChart", "metric": "v"}"#)
        .expect("single metric");
    assert_eq!(single.metric, MetricKeys::Single("v".to_owned()));
    assert!(single.data.is_empty());
}

#[test]
fn spec_json_round_trips_through_pretty_output() {
    let spec = ChartSpec::from_json_str(SPEC_JSON).expect("spec json");
    let json = spec.to_json_pretty().expect("serialize");
    let reparsed = ChartSpec::from_json_str(&json).expect("reparse");

    assert_eq!(reparsed.selector, spec.selector);
    assert_eq!(reparsed.metric, spec.metric);
    assert_eq!(reparsed.data, spec.data);
}

#[test]
fn malformed_spec_json_is_invalid_data() {
    assert!(matches!(
        ChartSpec::from_json_str("{\"selector\": 1"),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        ChartSpec::from_json_str(r#"{"selector": "c", "chartType": "donut"}"#),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn snapshot_reflects_the_mounted_chart() {
    let snapshot = mounted_snapshot();

    assert_eq!(snapshot.selector, "sales-chart");
    assert_eq!(snapshot.chart_type, ChartType::VerticalBar);
    assert_eq!(snapshot.shapes.len(), 4);
    assert_eq!(snapshot.last_stats.entered, 4);
    assert_eq!(snapshot.coordinate_system.y.ticks, 3);
    assert_eq!(snapshot.coordinate_system.palette.fill, vec!["#34495e".to_owned()]);
    assert!(snapshot.shapes.iter().all(|shape| shape.tag == "rect"));
    assert_eq!(snapshot.shapes[0].group, "r0");
    assert_eq!(
        snapshot.shapes[0].datum.as_ref().and_then(|datum| datum.dimension.as_deref()),
        Some("Jan")
    );
}

#[test]
fn contract_v1_carries_schema_version() {
    let snapshot = mounted_snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("contract json");

    assert!(json.contains("\"schema_version\": 1"));
    let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, CHART_SNAPSHOT_JSON_SCHEMA_V1);
}

#[test]
fn compat_parser_accepts_bare_and_versioned_payloads() {
    let snapshot = mounted_snapshot();

    let versioned = ChartSnapshot::from_json_compat_str(
        &snapshot.to_json_contract_v1_pretty().expect("contract json"),
    )
    .expect("versioned payload");
    assert_eq!(versioned.selector, snapshot.selector);
    assert_eq!(versioned.shapes.len(), snapshot.shapes.len());

    let bare = ChartSnapshot::from_json_compat_str(&snapshot.to_json_pretty().expect("json"))
        .expect("bare payload");
    assert_eq!(bare.shapes.len(), snapshot.shapes.len());
    assert_eq!(bare.last_stats, snapshot.last_stats);
}

#[test]
fn compat_parser_rejects_unknown_schema_versions() {
    let snapshot = mounted_snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("contract json");
    let bumped = json.replace("\"schema_version\": 1", "\"schema_version\": 2");

    match ChartSnapshot::from_json_compat_str(&bumped) {
        Err(ChartError::InvalidData(message)) => assert!(message.contains('2')),
        other => panic!("expected unsupported version error, got {other:?}"),
    }
    assert!(matches!(
        ChartSnapshot::from_json_compat_str("not json"),
        Err(ChartError::InvalidData(_))
    ));
}
