pub mod axis;
pub mod coordinate_system;
pub mod dataset;
pub mod layout;
pub mod overrides;
pub mod scale;
pub mod types;

pub use axis::{AxisOrient, AxisSpec, AxisTick};
pub use coordinate_system::{
    CoordinateSystem, GeometryContext, GoalLine, ScaleBuilder, XAxisGeometry, YAxisGeometry,
    build_category_x_scales, build_coordinate_system,
};
pub use dataset::{DatasetStats, Triplet, normalize};
pub use layout::ChartLayout;
pub use overrides::{
    BarConfig, BarOverride, ColorList, GeometryConfig, GeometryOverrides, Palette,
    PaletteOverride, PointConfig, PointOverride, XAxisConfig, XAxisOverride, YAxisConfig,
    YAxisOverride, merge_overrides,
};
pub use scale::{LinearScale, MAX_TICK_COUNT, OrdinalScale, Scale, TickValues, format_si_tick};
pub use types::{ChartSpec, ChartType, LegendConfig, MetricKeys, NormalizedDatum, SeriesDatum};
