use crate::core::{
    ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine, ScaleBuilder,
    build_category_x_scales,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::{
    ChartKind, category_slot, horizontal_goal, numeric_attrs, path_attrs, polyline,
    project_marks,
};

const LINE_STROKE_WIDTH: f64 = 2.0;

/// One polyline per series through the slot centers, plus a point per datum.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineChart;

/// Slot-centered points of one series, in dataset order.
pub(crate) fn series_points(
    ctx: &GeometryContext<'_>,
    cs: &CoordinateSystem,
    series: usize,
) -> ChartResult<Vec<(f64, f64)>> {
    let y_scale = cs.y_linear()?;
    let half_slot = category_slot(ctx, cs.y.axis_width, cs.bar.v_padding) / 2.0;
    Ok(ctx
        .dataset
        .iter()
        .zip(&cs.x.range)
        .map(|(datum, offset)| {
            (
                cs.y.axis_width + offset + half_slot,
                y_scale.map(datum.metric(series)),
            )
        })
        .collect())
}

impl ScaleBuilder for LineChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        GeometryConfig::default()
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        let half_slot = category_slot(ctx, cs.y.axis_width, cs.bar.v_padding) / 2.0;
        build_category_x_scales(cs, ctx, half_slot)
    }
}

impl ChartKind for LineChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let mut groups = Vec::with_capacity(ctx.series_count() * 2);
        for series in 0..ctx.series_count() {
            let points = series_points(ctx, cs, series)?;
            let color = cs.palette.line_at(series);

            let line_class = format!("line{series}");
            let line = points.first().map(|first| Mark {
                geometry: path_attrs(polyline(&points)),
                style: ShapeStyle::new(line_class.clone())
                    .with_fill(Some("none"))
                    .with_stroke(color)
                    .with_stroke_width(LINE_STROKE_WIDTH),
                datum: None,
                anchor: *first,
            });
            groups.push(MarkGroup {
                key: line_class,
                series,
                shape: ShapeKind::Path,
                marks: line.into_iter().collect(),
            });

            let point_class = format!("p{series}");
            let style = ShapeStyle::new(point_class.clone())
                .with_fill(color)
                .with_stroke(Some(cs.palette.stroke.as_str()));
            let radius = cs.points.radius;
            let marks = project_marks(ctx.dataset, |index, datum| {
                let (cx, cy) = points[index];
                Ok(Mark {
                    geometry: numeric_attrs([("cx", cx), ("cy", cy), ("r", radius)]),
                    style: style.clone(),
                    datum: Some(datum.series(series)),
                    anchor: (cx, cy),
                })
            })?;
            groups.push(MarkGroup {
                key: point_class,
                series,
                shape: ShapeKind::Circle,
                marks,
            });
        }
        Ok(groups)
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
