use std::time::Duration;

use crate::core::{ChartLayout, ChartSpec, CoordinateSystem};
use crate::extensions::ChartPlugin;
use crate::interaction::InteractionState;
use crate::render::{
    ChartDecorator, DEFAULT_TRANSITION_DURATION, ReconcileStats, SvgContainer,
};

mod chart_snapshot;
mod interaction_controller;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod render_cycle;

pub use chart_snapshot::{ChartSnapshot, ShapeSnapshot};
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHostConfig {
    /// Duration of the update transition of surviving shapes.
    pub transition_duration: Duration,
}

impl Default for ChartHostConfig {
    fn default() -> Self {
        Self {
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

impl ChartHostConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }
}

/// Lifecycle facade owning one chart's SVG container.
///
/// The host calls [`ChartHost::mount`] once and [`ChartHost::update`] on every
/// data change; each call runs a full render cycle against the container.
pub struct ChartHost<D: ChartDecorator> {
    config: ChartHostConfig,
    decorator: D,
    container: SvgContainer,
    spec: Option<ChartSpec>,
    layout: Option<ChartLayout>,
    coordinate_system: Option<CoordinateSystem>,
    interaction: InteractionState,
    plugins: Vec<Box<dyn ChartPlugin>>,
    last_stats: ReconcileStats,
}

impl<D: ChartDecorator> ChartHost<D> {
    #[must_use]
    pub fn new(decorator: D, config: ChartHostConfig) -> Self {
        Self {
            config,
            decorator,
            container: SvgContainer::new("", 0.0, 0.0),
            spec: None,
            layout: None,
            coordinate_system: None,
            interaction: InteractionState::default(),
            plugins: Vec::new(),
            last_stats: ReconcileStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> ChartHostConfig {
        self.config
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.spec.is_some()
    }

    /// The chart's SVG subtree.
    #[must_use]
    pub fn surface(&self) -> &SvgContainer {
        &self.container
    }

    #[must_use]
    pub fn spec(&self) -> Option<&ChartSpec> {
        self.spec.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> Option<ChartLayout> {
        self.layout
    }

    /// Coordinate system built by the last successful render cycle.
    #[must_use]
    pub fn coordinate_system(&self) -> Option<&CoordinateSystem> {
        self.coordinate_system.as_ref()
    }

    #[must_use]
    pub fn last_stats(&self) -> ReconcileStats {
        self.last_stats
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn decorator(&self) -> &D {
        &self.decorator
    }

    pub fn decorator_mut(&mut self) -> &mut D {
        &mut self.decorator
    }

    /// Advances running transitions by `elapsed`; returns how many still run.
    pub fn advance_transitions(&mut self, elapsed: Duration) -> usize {
        self.container.advance(elapsed)
    }

    #[must_use]
    pub fn has_running_transitions(&self) -> bool {
        self.container.has_running_transitions()
    }
}
