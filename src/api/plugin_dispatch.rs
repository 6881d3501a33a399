use tracing::trace;

use crate::extensions::{ChartEvent, PluginContext};
use crate::render::ChartDecorator;

use super::ChartHost;

impl<D: ChartDecorator> ChartHost<D> {
    /// Context handed to plugins; `None` before the first render.
    pub(super) fn plugin_context(&self) -> Option<PluginContext> {
        let spec = self.spec.as_ref()?;
        let layout = self.layout?;
        Some(PluginContext {
            selector: spec.selector.clone(),
            chart_type: spec.chart_type,
            layout,
            records: spec.data.len(),
            series_count: spec.series_count(),
            shapes: self.container.len(),
            interaction_mode: self.interaction.mode(),
        })
    }

    pub(super) fn emit_plugin_event(&mut self, event: ChartEvent) {
        let Some(context) = self.plugin_context() else {
            return;
        };
        trace!(event = event.name(), plugins = self.plugins.len(), "dispatching chart event");
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }
}
