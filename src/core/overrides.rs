use serde::{Deserialize, Serialize};

/// Fill and stroke colors shared by every shape of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Per-series (or per-slice for pies) fill colors.
    pub fill: Vec<String>,
    pub stroke: String,
    /// Line colors for line/area charts; falls back to `fill` when absent.
    pub line_fill: Option<Vec<String>>,
}

impl Palette {
    /// Fill color for `index`, cycling through the palette.
    #[must_use]
    pub fn fill_at(&self, index: usize) -> Option<&str> {
        if self.fill.is_empty() {
            return None;
        }
        self.fill.get(index % self.fill.len()).map(String::as_str)
    }

    #[must_use]
    pub fn line_at(&self, index: usize) -> Option<&str> {
        match &self.line_fill {
            Some(colors) if !colors.is_empty() => {
                colors.get(index % colors.len()).map(String::as_str)
            }
            _ => self.fill_at(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarConfig {
    pub h_padding: f64,
    pub v_padding: f64,
    /// Share of the slot width a bar group occupies, in percent.
    pub h_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointConfig {
    pub radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisConfig {
    pub axis_height: f64,
    pub ticks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisConfig {
    pub axis_width: f64,
    pub ticks: usize,
}

/// Default geometry of a chart kind before scales are built.
///
/// Each top-level field is one merge unit for [`merge_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub palette: Palette,
    pub bar: BarConfig,
    pub points: PointConfig,
    pub x: XAxisConfig,
    pub y: YAxisConfig,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            palette: Palette {
                fill: vec!["#005792".to_owned(), "#ffcdcd".to_owned()],
                stroke: "#d1f4fa".to_owned(),
                line_fill: None,
            },
            bar: BarConfig {
                h_padding: 0.0,
                v_padding: 0.0,
                h_percent: 100.0,
            },
            points: PointConfig {
                radius: 5.0,
                min_radius: 2.0,
                max_radius: 20.0,
            },
            x: XAxisConfig {
                axis_height: 20.0,
                ticks: 5,
            },
            y: YAxisConfig {
                axis_width: 30.0,
                ticks: 5,
            },
        }
    }
}

/// A single color or a list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorList {
    One(String),
    Many(Vec<String>),
}

impl ColorList {
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(color) => vec![color.clone()],
            Self::Many(colors) => colors.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteOverride {
    pub fill: Option<ColorList>,
    pub stroke: Option<String>,
    pub line_fill: Option<ColorList>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarOverride {
    pub h_padding: Option<f64>,
    pub v_padding: Option<f64>,
    pub h_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointOverride {
    pub radius: Option<f64>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XAxisOverride {
    pub axis_height: Option<f64>,
    pub ticks: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YAxisOverride {
    pub axis_width: Option<f64>,
    pub ticks: Option<usize>,
}

/// Caller-supplied partial geometry. Unknown JSON keys are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryOverrides {
    pub palette: Option<PaletteOverride>,
    pub bar: Option<BarOverride>,
    pub points: Option<PointOverride>,
    pub x: Option<XAxisOverride>,
    pub y: Option<YAxisOverride>,
}

impl GeometryOverrides {
    #[must_use]
    pub fn with_palette(mut self, palette: PaletteOverride) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_bar(mut self, bar: BarOverride) -> Self {
        self.bar = Some(bar);
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: PointOverride) -> Self {
        self.points = Some(points);
        self
    }

    #[must_use]
    pub fn with_x(mut self, x: XAxisOverride) -> Self {
        self.x = Some(x);
        self
    }

    #[must_use]
    pub fn with_y(mut self, y: YAxisOverride) -> Self {
        self.y = Some(y);
        self
    }
}

/// Shallow per-key merge of `overrides` onto `base`.
///
/// For each top-level key present in the override, only the fields it sets
/// replace the base fields; everything else keeps its default. `None` returns
/// `base` unchanged.
#[must_use]
pub fn merge_overrides(
    mut base: GeometryConfig,
    overrides: Option<&GeometryOverrides>,
) -> GeometryConfig {
    let Some(overrides) = overrides else {
        return base;
    };

    if let Some(palette) = &overrides.palette {
        if let Some(fill) = &palette.fill {
            base.palette.fill = fill.to_vec();
        }
        assign(&mut base.palette.stroke, palette.stroke.clone());
        if let Some(line_fill) = &palette.line_fill {
            base.palette.line_fill = Some(line_fill.to_vec());
        }
    }
    if let Some(bar) = overrides.bar {
        assign(&mut base.bar.h_padding, bar.h_padding);
        assign(&mut base.bar.v_padding, bar.v_padding);
        assign(&mut base.bar.h_percent, bar.h_percent);
    }
    if let Some(points) = overrides.points {
        assign(&mut base.points.radius, points.radius);
        assign(&mut base.points.min_radius, points.min_radius);
        assign(&mut base.points.max_radius, points.max_radius);
    }
    if let Some(x) = overrides.x {
        assign(&mut base.x.axis_height, x.axis_height);
        assign(&mut base.x.ticks, x.ticks);
    }
    if let Some(y) = overrides.y {
        assign(&mut base.y.axis_width, y.axis_width);
        assign(&mut base.y.ticks, y.ticks);
    }
    base
}

fn assign<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
