mod axis;
mod decorations;
mod reconcile;
mod svg;
mod transition;

pub use axis::{AXIS_CLASS, axis_node};
pub use decorations::{
    ChartDecorator, GOAL_ID, GOAL_STROKE, LEGEND_CLASS, NullDecorator, SvgDecorator,
    TOOLTIP_CLASS,
};
pub use reconcile::{
    Mark, MarkGroup, ReconcileStats, ReconciliationRenderer, ShapeBinding, ShapeKind, ShapeStyle,
    bound_elements,
};
pub use svg::{AttrMap, AttrValue, ElementId, PointerEventKind, SvgContainer, SvgNode};
pub use transition::{DEFAULT_TRANSITION_DURATION, Transition, interpolate};
