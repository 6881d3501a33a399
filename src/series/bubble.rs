use crate::core::{
    ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine, LinearScale,
    ScaleBuilder,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::scatter::{build_point_scales, point_center};
use super::{ChartKind, horizontal_goal, numeric_attrs, project_marks};

/// Scatter plot whose circle radius encodes the third metric.
#[derive(Debug, Default, Clone, Copy)]
pub struct BubbleChart;

impl BubbleChart {
    /// Maps the third metric onto `[minRadius, maxRadius]`.
    pub fn radius_scale(ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<LinearScale> {
        LinearScale::new(
            (ctx.stats.min_triplet.v3, ctx.stats.max_triplet.v3),
            (cs.points.min_radius, cs.points.max_radius),
        )
    }
}

impl ScaleBuilder for BubbleChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        GeometryConfig::default()
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        build_point_scales(cs, ctx)
    }
}

impl ChartKind for BubbleChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Bubble
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let (x_scale, y_scale) = (cs.x_linear()?, cs.y_linear()?);
        let radius_scale = Self::radius_scale(ctx, cs)?;
        let style = ShapeStyle::new("b0")
            .with_fill(cs.palette.fill_at(0))
            .with_stroke(Some(cs.palette.stroke.as_str()));

        let marks = project_marks(ctx.dataset, |_, datum| {
            let (cx, cy) = point_center(datum, x_scale, y_scale);
            let radius = radius_scale.map(datum.metric(2));
            Ok(Mark {
                geometry: numeric_attrs([("cx", cx), ("cy", cy), ("r", radius)]),
                style: style.clone(),
                datum: Some(datum.series(2)),
                anchor: (cx, cy - radius),
            })
        })?;

        Ok(vec![MarkGroup {
            key: "b0".to_owned(),
            series: 0,
            shape: ShapeKind::Circle,
            marks,
        }])
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
