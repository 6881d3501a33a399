//! vchart-rs: declarative statistical charts rendered into a retained SVG
//! subtree.
//!
//! A [`ChartSpec`] describes the chart; every render cycle normalizes its
//! records, builds a coordinate system for the chart type, projects one mark
//! per datum and reconciles those marks against the shapes already on screen
//! with an index-keyed enter/update/exit pass.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod series;
pub mod telemetry;

pub use api::{ChartHost, ChartHostConfig, ChartSnapshot};
pub use core::{ChartSpec, ChartType};
pub use error::{ChartError, ChartResult};
pub use render::{NullDecorator, SvgContainer, SvgDecorator};
