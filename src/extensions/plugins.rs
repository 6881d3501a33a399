use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ChartType, SeriesDatum};
use crate::interaction::InteractionMode;
use crate::render::ReconcileStats;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub selector: String,
    pub chart_type: ChartType,
    pub layout: ChartLayout,
    pub records: usize,
    pub series_count: usize,
    pub shapes: usize,
    pub interaction_mode: InteractionMode,
}

/// Notifications emitted by a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Mounted,
    Refreshed {
        stats: ReconcileStats,
    },
    /// A data shape was clicked; carries the datum bound to it.
    Click {
        series: usize,
        index: usize,
        datum: SeriesDatum,
    },
    TooltipShown {
        series: usize,
        index: usize,
        x: f64,
        y: f64,
    },
    TooltipHidden,
}

impl ChartEvent {
    /// Host-facing event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::Refreshed { .. } => "refreshed",
            Self::Click { .. } => "chart-click",
            Self::TooltipShown { .. } => "tooltip-shown",
            Self::TooltipHidden => "tooltip-hidden",
        }
    }
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read chart context without mutating the
/// container directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: &PluginContext);
}
