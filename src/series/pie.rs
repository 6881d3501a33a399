use std::f64::consts::TAU;

use crate::core::{ChartType, CoordinateSystem, GeometryConfig, GeometryContext, ScaleBuilder};
use crate::error::ChartResult;
use crate::render::{Mark, MarkGroup, ShapeKind, ShapeStyle};

use super::{ChartKind, path_attrs};

const PIE_FILL: [&str; 6] = [
    "#005792", "#ffcdcd", "#d1f4fa", "#fd5f00", "#76b39d", "#f9f8eb",
];
const PIE_STROKE: &str = "#ffffff";

/// One arc per datum of the first series; no scales and no axes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PieChart;

/// Center and radius of the pie inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieFrame {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl PieFrame {
    #[must_use]
    pub fn from_context(ctx: &GeometryContext<'_>) -> Self {
        let layout = ctx.layout;
        let plot_height = (layout.display_height - layout.header()).max(0.0);
        Self {
            cx: layout.width / 2.0,
            cy: layout.header() + plot_height / 2.0,
            radius: layout.width.min(plot_height) / 2.0,
        }
    }

    /// Point on the circle at `angle`, measured clockwise from twelve o'clock.
    fn point(self, angle: f64, radius: f64) -> (f64, f64) {
        (
            self.cx + radius * angle.sin(),
            self.cy - radius * angle.cos(),
        )
    }

    /// Wedge between two angles, drawn as two half arcs so every slice keeps
    /// the same command structure whatever its sweep.
    fn wedge(self, start: f64, end: f64) -> String {
        let r = self.radius;
        let (x0, y0) = self.point(start, r);
        let (xm, ym) = self.point((start + end) / 2.0, r);
        let (x1, y1) = self.point(end, r);
        format!(
            "M{},{}L{x0},{y0}A{r},{r} 0 0,1 {xm},{ym}A{r},{r} 0 0,1 {x1},{y1}Z",
            self.cx, self.cy
        )
    }
}

/// Start and end angles of each slice; negative values count as empty slices.
#[must_use]
pub fn slice_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().map(|value| value.max(0.0)).sum();
    let mut start = 0.0;
    values
        .iter()
        .map(|value| {
            let sweep = if total > 0.0 {
                value.max(0.0) / total * TAU
            } else {
                0.0
            };
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

impl ScaleBuilder for PieChart {
    fn default_geometry(&self, _ctx: &GeometryContext<'_>) -> GeometryConfig {
        let mut config = GeometryConfig::default();
        config.palette.fill = PIE_FILL.iter().map(|color| (*color).to_owned()).collect();
        config.palette.stroke = PIE_STROKE.to_owned();
        config
    }

    fn build_scales(&self, _cs: &mut CoordinateSystem, _ctx: &GeometryContext<'_>) -> ChartResult<()> {
        Ok(())
    }
}

impl ChartKind for PieChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Pie
    }

    fn project(&self, ctx: &GeometryContext<'_>, cs: &CoordinateSystem) -> ChartResult<Vec<MarkGroup>> {
        let frame = PieFrame::from_context(ctx);
        let values: Vec<f64> = ctx.dataset.iter().map(|datum| datum.metric(0)).collect();

        let marks = ctx
            .dataset
            .iter()
            .zip(slice_angles(&values))
            .enumerate()
            .map(|(index, (datum, (start, end)))| Mark {
                geometry: path_attrs(frame.wedge(start, end)),
                style: ShapeStyle::new("arc0")
                    .with_fill(cs.palette.fill_at(index))
                    .with_stroke(Some(cs.palette.stroke.as_str())),
                datum: Some(datum.series(0)),
                anchor: frame.point((start + end) / 2.0, frame.radius / 2.0),
            })
            .collect();

        Ok(vec![MarkGroup {
            key: "arc0".to_owned(),
            series: 0,
            shape: ShapeKind::Path,
            marks,
        }])
    }
}
