use crate::core::{
    ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine, ScaleBuilder,
    build_category_x_scales,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::{ChartKind, horizontal_goal, numeric_attrs, project_marks};

/// Vertical bars, one rect per datum and series, grouped side by side.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalBarChart;

impl VerticalBarChart {
    /// Bar width shared by every bar of the cycle.
    #[must_use]
    pub fn bar_width(ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> f64 {
        let len = ctx.dataset.len().max(1) as f64;
        let series = ctx.series_count().max(1) as f64;
        ((ctx.layout.width - cs.y.axis_width) / len - 1.0) / series / (100.0 / cs.bar.h_percent)
    }
}

impl ScaleBuilder for VerticalBarChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        GeometryConfig::default()
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        build_category_x_scales(cs, ctx, 0.0)
    }
}

impl ChartKind for VerticalBarChart {
    fn chart_type(&self) -> ChartType {
        ChartType::VerticalBar
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let y_scale = cs.y_linear()?;
        let width = Self::bar_width(ctx, cs);
        let step = (ctx.layout.width - cs.y.axis_width) / ctx.dataset.len().max(1) as f64;
        let display_height = ctx.layout.display_height;

        (0..ctx.series_count())
            .map(|series| {
                let class = format!("r{series}");
                let style = ShapeStyle::new(class.clone())
                    .with_fill(cs.palette.fill_at(series))
                    .with_stroke(Some(cs.palette.stroke.as_str()));

                let marks = project_marks(ctx.dataset, |index, datum| {
                    let value = datum.metric(series);
                    let x = index as f64 * step + cs.y.axis_width + series as f64 * width;
                    let y = y_scale.map(value);
                    Ok(Mark {
                        geometry: numeric_attrs([
                            ("width", width),
                            ("height", display_height - y),
                            ("x", x),
                            ("y", y),
                        ]),
                        style: style.clone(),
                        datum: Some(datum.series(series)),
                        anchor: (x, y),
                    })
                })?;

                Ok(MarkGroup {
                    key: class,
                    series,
                    shape: ShapeKind::Rect,
                    marks,
                })
            })
            .collect()
    }

    fn goal_line(
        &self,
        goal: f64,
        ctx: &GeometryContext<'_>,
        cs: &CoordinateSystem,
    ) -> ChartResult<Option<GoalLine>> {
        horizontal_goal(goal, ctx, cs)
    }
}
