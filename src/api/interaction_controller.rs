use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::{ChartDecorator, ElementId, PointerEventKind, ShapeBinding};

use super::ChartHost;

impl<D: ChartDecorator> ChartHost<D> {
    /// Binding of `element` when it listens to `kind`.
    ///
    /// Unknown elements are an error; known elements without a handler for
    /// `kind` (axes, aggregate paths) yield `None`.
    fn interactive_binding(
        &self,
        element: ElementId,
        kind: PointerEventKind,
    ) -> ChartResult<Option<ShapeBinding>> {
        let node = self
            .container
            .get(element)
            .ok_or(ChartError::UnknownElement(element.0))?;
        if !node.listens(kind) {
            warn!(
                element = element.0,
                tag = node.tag(),
                ?kind,
                "pointer event on an element without a handler"
            );
            return Ok(None);
        }
        Ok(node.binding().cloned())
    }

    /// Shows the tooltip of a data shape, at `pointer` when the host knows the
    /// pointer position and at the shape's anchor otherwise.
    pub fn pointer_over(
        &mut self,
        element: ElementId,
        pointer: Option<(f64, f64)>,
    ) -> ChartResult<bool> {
        let Some(binding) = self.interactive_binding(element, PointerEventKind::Over)? else {
            return Ok(false);
        };
        let Some(datum) = binding.datum.as_ref() else {
            return Ok(false);
        };

        let (x, y) = pointer.unwrap_or(binding.anchor);
        self.decorator.add_tooltip(&mut self.container, datum, (x, y));
        self.interaction.on_pointer_over(element, pointer);
        trace!(element = element.0, x, y, "tooltip shown");

        self.emit_plugin_event(ChartEvent::TooltipShown {
            series: binding.series,
            index: binding.index,
            x,
            y,
        });
        Ok(true)
    }

    /// Removes every tooltip of the chart.
    pub fn pointer_out(&mut self, element: ElementId) -> ChartResult<bool> {
        if self
            .interactive_binding(element, PointerEventKind::Out)?
            .is_none()
        {
            return Ok(false);
        }

        self.decorator.remove_tooltip(&mut self.container);
        self.interaction.on_pointer_out();
        self.emit_plugin_event(ChartEvent::TooltipHidden);
        Ok(true)
    }

    /// Emits a `chart-click` event carrying the datum bound to `element`.
    pub fn click(&mut self, element: ElementId) -> ChartResult<Option<ChartEvent>> {
        let Some(binding) = self.interactive_binding(element, PointerEventKind::Click)? else {
            return Ok(None);
        };
        let Some(datum) = binding.datum else {
            return Ok(None);
        };

        let event = ChartEvent::Click {
            series: binding.series,
            index: binding.index,
            datum,
        };
        self.interaction.on_click();
        self.emit_plugin_event(event.clone());
        Ok(Some(event))
    }
}
