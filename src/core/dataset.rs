use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{ChartSpec, NormalizedDatum};

/// Reduces the raw records of `spec` to one [`NormalizedDatum`] per record.
///
/// Output order and length match `spec.data`. Missing, null, non-numeric and
/// zero-valued metric fields all normalize to `0.0`; the two cases cannot be
/// told apart afterwards.
#[must_use]
pub fn normalize(spec: &ChartSpec) -> Vec<NormalizedDatum> {
    let keys = spec.metric.keys();
    let raw = spec.metric.is_raw();

    let dataset: Vec<NormalizedDatum> = spec
        .data
        .iter()
        .map(|record| {
            let metrics = if raw {
                vec![metric_value(Some(record))]
            } else {
                keys.iter()
                    .map(|key| metric_value(key.and_then(|key| record.get(key))))
                    .collect()
            };
            let dimension = spec
                .dim
                .as_deref()
                .filter(|dim| !dim.is_empty())
                .and_then(|dim| dimension_label(record.get(dim)));
            NormalizedDatum::new(metrics, dimension)
        })
        .collect();

    trace!(
        records = dataset.len(),
        series = keys.len(),
        raw,
        "normalized dataset"
    );
    dataset
}

fn metric_value(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() { number } else { 0.0 }
}

fn dimension_label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

/// Component-wise extent over the first three metrics of every datum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triplet {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
}

impl Triplet {
    #[must_use]
    pub fn component(self, index: usize) -> f64 {
        match index {
            0 => self.v1,
            1 => self.v2,
            _ => self.v3,
        }
    }
}

/// Extents shared by the coordinate-system builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Largest metric value, never below zero.
    pub max: f64,
    /// Smallest metric value, zero for an empty dataset.
    pub min: f64,
    pub max_triplet: Triplet,
    pub min_triplet: Triplet,
    pub len: usize,
}

impl DatasetStats {
    #[must_use]
    pub fn from_dataset(dataset: &[NormalizedDatum]) -> Self {
        let values = || dataset.iter().flat_map(|datum| datum.metrics.iter().copied());
        let max = values()
            .map(OrderedFloat)
            .max()
            .map_or(0.0, |value| value.0.max(0.0));
        let min = values().map(OrderedFloat).min().map_or(0.0, |value| value.0);

        let component_max = |index: usize| {
            dataset
                .iter()
                .map(|datum| OrderedFloat(datum.metric(index)))
                .max()
                .map_or(0.0, |value| value.0.max(0.0))
        };
        let component_min = |index: usize| {
            dataset
                .iter()
                .map(|datum| OrderedFloat(datum.metric(index)))
                .min()
                .map_or(0.0, |value| value.0)
        };

        Self {
            max,
            min,
            max_triplet: Triplet {
                v1: component_max(0),
                v2: component_max(1),
                v3: component_max(2),
            },
            min_triplet: Triplet {
                v1: component_min(0),
                v2: component_min(1),
                v3: component_min(2),
            },
            len: dataset.len(),
        }
    }
}
