use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, OrdinalScale, format_si_tick};

/// Side of the plot the axis is drawn on; decides tick direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrient {
    Left,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Offset along the axis, relative to the axis translation.
    pub offset: f64,
    pub label: String,
}

/// Fully resolved axis: placement, extent and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    /// Start and end of the domain line along the axis.
    pub extent: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

impl AxisSpec {
    #[must_use]
    pub fn linear(
        orient: AxisOrient,
        scale: LinearScale,
        tick_count: usize,
        translate: (f64, f64),
    ) -> Self {
        let ticks = scale
            .ticks(tick_count)
            .into_iter()
            .map(|value| AxisTick {
                offset: scale.map(value),
                label: format_si_tick(value),
            })
            .collect();

        Self {
            orient,
            translate,
            extent: scale.range(),
            ticks,
        }
    }

    /// One tick per distinct label, shifted by `band_offset` (half a slot for
    /// point charts, zero for bars whose tick sits on the bar's edge).
    #[must_use]
    pub fn ordinal(
        orient: AxisOrient,
        scale: &OrdinalScale,
        translate: (f64, f64),
        band_offset: f64,
    ) -> Self {
        let mut seen: Vec<&Option<String>> = Vec::with_capacity(scale.domain().len());
        let mut ticks = Vec::with_capacity(scale.domain().len());
        for (label, offset) in scale.domain().iter().zip(scale.range()) {
            if seen.contains(&label) {
                continue;
            }
            seen.push(label);
            ticks.push(AxisTick {
                offset: offset + band_offset,
                label: label.clone().unwrap_or_default(),
            });
        }

        let extent = match (scale.range().first(), scale.range().last()) {
            (Some(first), Some(last)) => (*first, *last + 2.0 * band_offset),
            _ => (0.0, 0.0),
        };

        Self {
            orient,
            translate,
            extent,
            ticks,
        }
    }
}
