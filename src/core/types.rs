use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::GeometryOverrides;
use crate::error::ChartError;

/// The seven supported chart variants, serialized with their host-facing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    #[serde(rename = "barChart")]
    Bar,
    #[serde(rename = "vBarChart")]
    VerticalBar,
    #[serde(rename = "lineGraph")]
    Line,
    #[serde(rename = "scatterPlot")]
    Scatter,
    #[serde(rename = "pieChart")]
    Pie,
    #[serde(rename = "areaChart")]
    Area,
    #[serde(rename = "bubbleChart")]
    Bubble,
}

impl ChartType {
    pub const ALL: [Self; 7] = [
        Self::Bar,
        Self::VerticalBar,
        Self::Line,
        Self::Scatter,
        Self::Pie,
        Self::Area,
        Self::Bubble,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "barChart",
            Self::VerticalBar => "vBarChart",
            Self::Line => "lineGraph",
            Self::Scatter => "scatterPlot",
            Self::Pie => "pieChart",
            Self::Area => "areaChart",
            Self::Bubble => "bubbleChart",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart type `{s}`")))
    }
}

/// Declared metric fields of a chart.
///
/// `Raw` (no metric at all, or an empty name) means the data records are bare
/// numbers rather than objects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricKeys {
    #[default]
    Raw,
    Single(String),
    Many(Vec<String>),
}

impl MetricKeys {
    #[must_use]
    pub fn keys(&self) -> Vec<Option<&str>> {
        match self {
            Self::Raw => vec![None],
            Self::Single(name) => vec![Some(name.as_str())],
            Self::Many(names) => names.iter().map(|name| Some(name.as_str())).collect(),
        }
    }

    /// Number of series the chart renders, one per declared metric.
    #[must_use]
    pub fn series_count(&self) -> usize {
        match self {
            Self::Raw | Self::Single(_) => 1,
            Self::Many(names) => names.len(),
        }
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        !matches!(self.keys().first(), Some(Some(name)) if !name.is_empty())
    }

    #[must_use]
    pub fn name(&self, series: usize) -> &str {
        self.keys()
            .get(series)
            .copied()
            .flatten()
            .unwrap_or_default()
    }
}

impl From<&str> for MetricKeys {
    fn from(name: &str) -> Self {
        Self::Single(name.to_owned())
    }
}

impl<const N: usize> From<[&str; N]> for MetricKeys {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Declarative description of one chart, supplied by the host per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub selector: String,
    pub chart_type: ChartType,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub metric: MetricKeys,
    #[serde(default)]
    pub dim: Option<String>,
    #[serde(default)]
    pub overrides: Option<GeometryOverrides>,
    #[serde(default)]
    pub goal: Option<f64>,
    #[serde(default)]
    pub legends: Option<LegendConfig>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub text_height: Option<f64>,
}

impl ChartSpec {
    #[must_use]
    pub fn new(selector: impl Into<String>, chart_type: ChartType) -> Self {
        Self {
            selector: selector.into(),
            chart_type,
            width: None,
            height: None,
            data: Vec::new(),
            metric: MetricKeys::Raw,
            dim: None,
            overrides: None,
            goal: None,
            legends: None,
            title: None,
            subtitle: None,
            text_height: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: impl Into<MetricKeys>) -> Self {
        self.metric = metric.into();
        self
    }

    #[must_use]
    pub fn with_dim(mut self, dim: impl Into<String>) -> Self {
        self.dim = Some(dim.into());
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: GeometryOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    #[must_use]
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    #[must_use]
    pub fn with_legends(mut self, enabled: bool) -> Self {
        self.legends = Some(LegendConfig { enabled });
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_text_height(mut self, text_height: f64) -> Self {
        self.text_height = Some(text_height);
        self
    }

    #[must_use]
    pub fn legends_enabled(&self) -> bool {
        self.legends.is_some_and(|legends| legends.enabled)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.metric.series_count()
    }
}

/// One input record reduced to its metric values and category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDatum {
    pub metrics: Vec<f64>,
    pub dimension: Option<String>,
}

impl NormalizedDatum {
    #[must_use]
    pub fn new(metrics: Vec<f64>, dimension: Option<String>) -> Self {
        Self { metrics, dimension }
    }

    /// Metric value for one series; missing components read as zero.
    #[must_use]
    pub fn metric(&self, series: usize) -> f64 {
        self.metrics.get(series).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn series(&self, series: usize) -> SeriesDatum {
        SeriesDatum {
            metric: self.metric(series),
            dimension: self.dimension.clone(),
        }
    }

    #[must_use]
    pub fn has_dimension(&self) -> bool {
        self.dimension.as_deref().is_some_and(|label| !label.is_empty())
    }
}

/// Per-series value bound to a single shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDatum {
    pub metric: f64,
    pub dimension: Option<String>,
}
