use serde::{Deserialize, Serialize};

use crate::core::ChartSpec;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_EXTENT_PX: f64 = 200.0;
pub const DEFAULT_TEXT_HEIGHT_PX: f64 = 25.0;
pub const SUBTITLE_HEIGHT_RATIO: f64 = 0.66;
pub const LEGEND_DISPLAY_RATIO: f64 = 0.80;

/// Pixel extents derived from a [`ChartSpec`] once per render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Height available to the plot; legends reserve the bottom fifth.
    pub display_height: f64,
    pub title_height: f64,
    pub subtitle_height: f64,
}

impl ChartLayout {
    /// An absent or zero width or height falls back to 200 pixels.
    pub fn from_spec(spec: &ChartSpec) -> ChartResult<Self> {
        let width = resolve_extent(spec.width);
        let height = resolve_extent(spec.height);
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ChartError::InvalidViewport { width, height });
        }

        let display_height = if spec.legends_enabled() {
            height * LEGEND_DISPLAY_RATIO
        } else {
            height
        };
        let text_height = spec
            .text_height
            .filter(|value| *value != 0.0 && value.is_finite());
        let title_height = if has_text(spec.title.as_deref()) {
            text_height.unwrap_or(DEFAULT_TEXT_HEIGHT_PX)
        } else {
            0.0
        };
        let subtitle_height = if has_text(spec.subtitle.as_deref()) {
            text_height.unwrap_or(DEFAULT_TEXT_HEIGHT_PX) * SUBTITLE_HEIGHT_RATIO
        } else {
            0.0
        };

        Ok(Self {
            width,
            height,
            display_height,
            title_height,
            subtitle_height,
        })
    }

    /// Combined title and subtitle band at the top of the chart.
    #[must_use]
    pub fn header(self) -> f64 {
        self.title_height + self.subtitle_height
    }
}

fn resolve_extent(value: Option<f64>) -> f64 {
    match value {
        Some(extent) if extent != 0.0 => extent,
        _ => DEFAULT_EXTENT_PX,
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.is_empty())
}
