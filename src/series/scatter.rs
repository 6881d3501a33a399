use crate::core::{
    AxisOrient, AxisSpec, ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine,
    LinearScale, NormalizedDatum, Scale, ScaleBuilder,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::{ChartKind, horizontal_goal, numeric_attrs, project_marks};

/// One circle per datum at `(metric[0], metric[1])`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScatterChart;

/// Linear x over the first metric and linear y over the second, both spanning
/// the observed extent.
pub(crate) fn build_point_scales(
    cs: &mut CoordinateSystem,
    ctx: &GeometryContext<'_>,
) -> ChartResult<()> {
    let layout = ctx.layout;
    let (min, max) = (ctx.stats.min_triplet, ctx.stats.max_triplet);
    let baseline = layout.display_height - cs.x.axis_height;

    let x_scale = LinearScale::new((min.v1, max.v1), (cs.y.axis_width, layout.width))?;
    let y_scale = LinearScale::new((min.v2, max.v2), (baseline, layout.header()))?;

    cs.y.axis = Some(AxisSpec::linear(
        AxisOrient::Left,
        y_scale,
        cs.y.ticks,
        (cs.y.axis_width, 0.0),
    ));
    cs.x.axis = Some(AxisSpec::linear(
        AxisOrient::Bottom,
        x_scale,
        cs.x.ticks,
        (0.0, baseline),
    ));
    cs.x.scale = Some(Scale::Linear(x_scale));
    cs.y.scale = Some(Scale::Linear(y_scale));
    Ok(())
}

/// Circle center of one datum.
pub(crate) fn point_center(
    datum: &NormalizedDatum,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> (f64, f64) {
    (x_scale.map(datum.metric(0)), y_scale.map(datum.metric(1)))
}

impl ScaleBuilder for ScatterChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        GeometryConfig::default()
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        build_point_scales(cs, ctx)
    }
}

impl ChartKind for ScatterChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Scatter
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let (x_scale, y_scale) = (cs.x_linear()?, cs.y_linear()?);
        let radius = cs.points.radius;
        let style = ShapeStyle::new("s0")
            .with_fill(cs.palette.fill_at(0))
            .with_stroke(Some(cs.palette.stroke.as_str()));

        let marks = project_marks(ctx.dataset, |_, datum| {
            let (cx, cy) = point_center(datum, x_scale, y_scale);
            Ok(Mark {
                geometry: numeric_attrs([("cx", cx), ("cy", cy), ("r", radius)]),
                style: style.clone(),
                datum: Some(datum.series(0)),
                anchor: (cx, cy),
            })
        })?;

        Ok(vec![MarkGroup {
            key: "s0".to_owned(),
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
