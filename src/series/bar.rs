use crate::core::{
    AxisOrient, AxisSpec, ChartType, CoordinateSystem, GeometryConfig, GeometryContext, GoalLine,
    LinearScale, OrdinalScale, Scale, ScaleBuilder,
};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::{ChartKind, numeric_attrs, project_marks};

const LABEL_CHAR_WIDTH_PX: f64 = 7.0;
const LABEL_GUTTER_PX: f64 = 10.0;

/// Horizontal bars: categories down the y axis, values along x.
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizontalBarChart;

impl HorizontalBarChart {
    /// Height of the band reserved for one category.
    fn band(ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> f64 {
        let layout = ctx.layout;
        (layout.display_height - layout.header() - cs.x.axis_height)
            / ctx.dataset.len().max(1) as f64
    }

    #[must_use]
    pub fn bar_height(ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> f64 {
        (Self::band(ctx, cs) - cs.bar.v_padding) / ctx.series_count().max(1) as f64
    }
}

impl ScaleBuilder for HorizontalBarChart {
    /// The category axis is as wide as the longest label needs.
    fn default_geometry(&self, ctx: &GeometryContext<'_>) -> GeometryConfig {
        let longest = ctx
            .dataset
            .iter()
            .filter_map(|datum| datum.dimension.as_deref())
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut config = GeometryConfig::default();
        config.bar.h_padding = 8.0;
        config.bar.v_padding = 5.0;
        config.y.axis_width = longest as f64 * LABEL_CHAR_WIDTH_PX + LABEL_GUTTER_PX;
        config
    }

    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>) -> ChartResult<()> {
        let layout = ctx.layout;
        let len = ctx.dataset.len();

        let x_scale = LinearScale::new(
            (0.0, ctx.stats.max),
            (0.0, layout.width - cs.y.axis_width - cs.bar.h_padding),
        )?;

        let band = Self::band(ctx, cs);
        cs.y.domain = ctx.labels();
        cs.y.range = (0..len)
            .map(|i| layout.header() + band * i as f64)
            .collect();
        let y_scale = OrdinalScale::new(cs.y.domain.clone(), cs.y.range.clone())?;

        cs.x.axis = Some(AxisSpec::linear(
            AxisOrient::Bottom,
            x_scale,
            cs.x.ticks,
            (
                cs.y.axis_width + cs.bar.h_padding,
                layout.display_height - cs.x.axis_height,
            ),
        ));
        cs.y.axis = ctx.has_category_axis().then(|| {
            AxisSpec::ordinal(AxisOrient::Left, &y_scale, (cs.y.axis_width, 0.0), band / 2.0)
        });
        cs.x.scale = Some(Scale::Linear(x_scale));
        cs.y.scale = Some(Scale::Ordinal(y_scale));
        Ok(())
    }
}

impl ChartKind for HorizontalBarChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let x_scale = cs.x_linear()?;
        let y_scale = cs.y_scale()?;
        let height = Self::bar_height(ctx, cs);
        let x = cs.y.axis_width + cs.bar.h_padding;

        (0..ctx.series_count())
            .map(|series| {
                let class = format!("r{series}");
                let style = ShapeStyle::new(class.clone())
                    .with_fill(cs.palette.fill_at(series))
                    .with_stroke(Some(cs.palette.stroke.as_str()));

                let marks = project_marks(ctx.dataset, |_, datum| {
                    let width = x_scale.map(datum.metric(series));
                    let y = y_scale.map_label(datum.dimension.as_deref())? + series as f64 * height;
                    Ok(Mark {
                        geometry: numeric_attrs([
                            ("width", width),
                            ("height", height),
                            ("x", x),
                            ("y", y),
                        ]),
                        style: style.clone(),
                        datum: Some(datum.series(series)),
                        anchor: (x + width, y),
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

    /// Vertical line at the goal value, spanning the plot height.
    fn goal_line(
        &self,
        goal: f64,
        ctx: &GeometryContext<'_>,
        cs: &CoordinateSystem,
    ) -> ChartResult<Option<GoalLine>> {
        let x = cs.x_linear()?.map(goal) + cs.y.axis_width + cs.bar.h_padding;
        Ok(Some(GoalLine {
            x1: x,
            x2: x,
            y1: ctx.layout.header(),
            y2: ctx.layout.display_height - cs.x.axis_height,
        }))
    }
}
