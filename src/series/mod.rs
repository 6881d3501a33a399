//! One projector per chart type.
//!
//! Every kind follows the same cycle: its [`ScaleBuilder`] half builds the
//! coordinate system, then [`ChartKind::project`] turns the normalized dataset
//! into the mark groups the reconciler diffs against the container.

mod area;
mod bar;
mod bubble;
mod line;
mod pie;
mod scatter;
mod vbar;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    ChartType, CoordinateSystem, GeometryContext, GoalLine, NormalizedDatum, ScaleBuilder,
};
use crate::error::ChartResult;
use crate::render::{AttrMap, AttrValue, Mark, MarkGroup};

pub use area::AreaChart;
pub use bar::HorizontalBarChart;
pub use bubble::BubbleChart;
pub use line::LineChart;
pub use pie::PieChart;
pub use scatter::ScatterChart;
pub use vbar::VerticalBarChart;

/// Chart-type specific geometry on top of the shared scale building.
pub trait ChartKind: ScaleBuilder + Sync {
    fn chart_type(&self) -> ChartType;

    /// Desired marks for this cycle, one group per series and shape layer.
    fn project(
        &self,
        ctx: &GeometryContext<'_>,
        cs: &CoordinateSystem,
    ) -> ChartResult<Vec<MarkGroup>>;

    /// Goal line placement, or `None` when the kind draws no goal.
    fn goal_line(
        &self,
        _goal: f64,
        _ctx: &GeometryContext<'_>,
        _cs: &CoordinateSystem,
    ) -> ChartResult<Option<GoalLine>> {
        Ok(None)
    }
}

/// Resolves the projector of a chart type.
#[must_use]
pub fn chart_kind(chart_type: ChartType) -> &'static dyn ChartKind {
    match chart_type {
        ChartType::Bar => &HorizontalBarChart,
        ChartType::VerticalBar => &VerticalBarChart,
        ChartType::Line => &LineChart,
        ChartType::Scatter => &ScatterChart,
        ChartType::Pie => &PieChart,
        ChartType::Area => &AreaChart,
        ChartType::Bubble => &BubbleChart,
    }
}

/// Projects one mark per datum, preserving dataset order.
pub(crate) fn project_marks<F>(dataset: &[NormalizedDatum], project: F) -> ChartResult<Vec<Mark>>
where
    F: Fn(usize, &NormalizedDatum) -> ChartResult<Mark> + Sync + Send,
{
    #[cfg(feature = "parallel-projection")]
    {
        dataset
            .par_iter()
            .enumerate()
            .map(|(index, datum)| project(index, datum))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        dataset
            .iter()
            .enumerate()
            .map(|(index, datum)| project(index, datum))
            .collect()
    }
}

pub(crate) fn numeric_attrs<const N: usize>(pairs: [(&str, f64); N]) -> AttrMap {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), AttrValue::Number(value)))
        .collect()
}

pub(crate) fn path_attrs(d: String) -> AttrMap {
    [("d".to_owned(), AttrValue::Text(d))].into_iter().collect()
}

/// `M x0,y0 L x1,y1 ...` through `points`.
pub(crate) fn polyline(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(index, (x, y))| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command}{x},{y}")
        })
        .collect()
}

/// Horizontal goal line across the plot for value-on-y charts.
pub(crate) fn horizontal_goal(
    goal: f64,
    ctx: &GeometryContext<'_>,
    cs: &CoordinateSystem,
) -> ChartResult<Option<GoalLine>> {
    let y = cs.y_linear()?.map(goal);
    Ok(Some(GoalLine {
        x1: cs.y.axis_width,
        x2: ctx.layout.width,
        y1: y,
        y2: y,
    }))
}

/// Width of one category slot along x; half of it centers a point in its slot.
pub(crate) fn category_slot(ctx: &GeometryContext<'_>, axis_width: f64, v_padding: f64) -> f64 {
    let len = ctx.dataset.len();
    if len == 0 {
        return 0.0;
    }
    (ctx.layout.width - axis_width + v_padding) / len as f64
}
