use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis::{AxisOrient, AxisSpec};
use crate::core::dataset::DatasetStats;
use crate::core::overrides::{
    BarConfig, GeometryConfig, Palette, PointConfig, merge_overrides,
};
use crate::core::scale::{LinearScale, OrdinalScale, Scale};
use crate::core::{ChartLayout, ChartSpec, NormalizedDatum};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisGeometry {
    pub axis_height: f64,
    pub ticks: usize,
    pub domain: Vec<Option<String>>,
    pub range: Vec<f64>,
    pub scale: Option<Scale>,
    pub axis: Option<AxisSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisGeometry {
    pub axis_width: f64,
    pub ticks: usize,
    pub domain: Vec<Option<String>>,
    pub range: Vec<f64>,
    pub scale: Option<Scale>,
    pub axis: Option<AxisSpec>,
}

/// Geometry descriptor for one render cycle.
///
/// Holds the merged configuration plus the scales and axes derived from the
/// dataset. Rebuilt from scratch on every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub palette: Palette,
    pub bar: BarConfig,
    pub points: PointConfig,
    pub x: XAxisGeometry,
    pub y: YAxisGeometry,
}

impl CoordinateSystem {
    #[must_use]
    pub fn from_config(config: GeometryConfig) -> Self {
        Self {
            palette: config.palette,
            bar: config.bar,
            points: config.points,
            x: XAxisGeometry {
                axis_height: config.x.axis_height,
                ticks: config.x.ticks,
                domain: Vec::new(),
                range: Vec::new(),
                scale: None,
                axis: None,
            },
            y: YAxisGeometry {
                axis_width: config.y.axis_width,
                ticks: config.y.ticks,
                domain: Vec::new(),
                range: Vec::new(),
                scale: None,
                axis: None,
            },
        }
    }

    pub fn x_scale(&self) -> ChartResult<&Scale> {
        self.x
            .scale
            .as_ref()
            .ok_or_else(|| ChartError::InvalidData("x scale has not been built".to_owned()))
    }

    pub fn y_scale(&self) -> ChartResult<&Scale> {
        self.y
            .scale
            .as_ref()
            .ok_or_else(|| ChartError::InvalidData("y scale has not been built".to_owned()))
    }

    pub fn x_linear(&self) -> ChartResult<LinearScale> {
        self.x_scale()?
            .as_linear()
            .ok_or_else(|| ChartError::InvalidData("x scale is not linear".to_owned()))
    }

    pub fn y_linear(&self) -> ChartResult<LinearScale> {
        self.y_scale()?
            .as_linear()
            .ok_or_else(|| ChartError::InvalidData("y scale is not linear".to_owned()))
    }

    /// Axes to draw this cycle, y first.
    pub fn axes(&self) -> impl Iterator<Item = &AxisSpec> {
        self.y.axis.iter().chain(self.x.axis.iter())
    }
}

/// Inputs shared by every scale builder.
#[derive(Debug, Clone, Copy)]
pub struct GeometryContext<'a> {
    pub spec: &'a ChartSpec,
    pub dataset: &'a [NormalizedDatum],
    pub layout: ChartLayout,
    pub stats: DatasetStats,
}

impl<'a> GeometryContext<'a> {
    #[must_use]
    pub fn new(spec: &'a ChartSpec, dataset: &'a [NormalizedDatum], layout: ChartLayout) -> Self {
        Self {
            spec,
            dataset,
            layout,
            stats: DatasetStats::from_dataset(dataset),
        }
    }

    #[must_use]
    pub fn labels(&self) -> Vec<Option<String>> {
        self.dataset
            .iter()
            .map(|datum| datum.dimension.clone())
            .collect()
    }

    /// The category axis is drawn only when the first datum carries a label.
    #[must_use]
    pub fn has_category_axis(&self) -> bool {
        self.dataset
            .first()
            .is_some_and(NormalizedDatum::has_dimension)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.spec.series_count()
    }
}

/// Chart-kind hooks used by [`build_coordinate_system`].
pub trait ScaleBuilder {
    /// Fixed default geometry of the chart kind.
    fn default_geometry(&self, ctx: &GeometryContext<'_>) -> GeometryConfig;

    /// Fills scales, domains, ranges and axes of `cs`.
    fn build_scales(&self, cs: &mut CoordinateSystem, ctx: &GeometryContext<'_>)
    -> ChartResult<()>;
}

/// Defaults, then overrides, then scales and axes. `ctx.spec` is not touched.
pub fn build_coordinate_system<B: ScaleBuilder + ?Sized>(
    builder: &B,
    ctx: &GeometryContext<'_>,
) -> ChartResult<CoordinateSystem> {
    let defaults = builder.default_geometry(ctx);
    let config = merge_overrides(defaults, ctx.spec.overrides.as_ref());
    let mut cs = CoordinateSystem::from_config(config);
    builder.build_scales(&mut cs, ctx)?;

    debug!(
        selector = %ctx.spec.selector,
        chart_type = %ctx.spec.chart_type,
        records = ctx.dataset.len(),
        max = ctx.stats.max,
        "built coordinate system"
    );
    Ok(cs)
}

/// Categories along x, values along y (vertical bar, line and area charts).
///
/// `x.range[i] = (width - axisWidth + vPadding) * i / len`; the y scale maps
/// `[0, max]` onto `[displayHeight, header]` so larger values sit higher.
pub fn build_category_x_scales(
    cs: &mut CoordinateSystem,
    ctx: &GeometryContext<'_>,
    band_offset: f64,
) -> ChartResult<()> {
    let layout = ctx.layout;
    let len = ctx.dataset.len();

    let y_scale = LinearScale::new(
        (0.0, ctx.stats.max),
        (layout.display_height, layout.header()),
    )?;

    let span = layout.width - cs.y.axis_width + cs.bar.v_padding;
    cs.x.domain = ctx.labels();
    cs.x.range = (0..len)
        .map(|i| span * i as f64 / len as f64)
        .collect();
    let x_scale = OrdinalScale::new(cs.x.domain.clone(), cs.x.range.clone())?;

    cs.y.axis = Some(AxisSpec::linear(
        AxisOrient::Left,
        y_scale,
        cs.y.ticks,
        (cs.y.axis_width, 0.0),
    ));
    cs.x.axis = ctx.has_category_axis().then(|| {
        AxisSpec::ordinal(
            AxisOrient::Bottom,
            &x_scale,
            (cs.y.axis_width, layout.display_height),
            band_offset,
        )
    });
    cs.y.scale = Some(Scale::Linear(y_scale));
    cs.x.scale = Some(Scale::Ordinal(x_scale));
    Ok(())
}

/// Horizontal line at `goal` for value-on-y charts, or vertical line for
/// value-on-x charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalLine {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}
