use crate::core::{
    ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine, ScaleBuilder,
    build_category_x_scales,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::line::series_points;
use super::{ChartKind, category_slot, horizontal_goal, path_attrs, polyline};

/// One filled area per series, closed down to the value-axis baseline.
#[derive(Debug, Default, Clone, Copy)]
pub struct AreaChart;

/// Outline of the area under `points`, returning along `baseline`.
fn area_path(points: &[(f64, f64)], baseline: f64) -> Option<String> {
    let (first, last) = (points.first()?, points.last()?);
    let mut outline = Vec::with_capacity(points.len() + 2);
    outline.push((first.0, baseline));
    outline.extend_from_slice(points);
    outline.push((last.0, baseline));
    Some(format!("{}Z", polyline(&outline)))
}

impl ScaleBuilder for AreaChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        GeometryConfig::default()
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        let half_slot = category_slot(ctx, cs.y.axis_width, cs.bar.v_padding) / 2.0;
        build_category_x_scales(cs, ctx, half_slot)
    }
}

impl ChartKind for AreaChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Area
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let baseline = ctx.layout.display_height;
        (0..ctx.series_count())
            .map(|series| {
                let points = series_points(ctx, cs, series)?;
                let class = format!("area{series}");
                let mark = area_path(&points, baseline).map(|d| Mark {
                    geometry: path_attrs(d),
                    style: ShapeStyle::new(class.clone())
                        .with_fill(cs.palette.fill_at(series))
                        .with_stroke(cs.palette.line_at(series)),
                    datum: None,
                    anchor: points.first().copied().unwrap_or_default(),
                });
                Ok(MarkGroup {
                    key: class,
                    series,
                    shape: ShapeKind::Path,
                    marks: mark.into_iter().collect(),
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
