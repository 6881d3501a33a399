//! Extension points that observe a chart without reaching into its core paths.

pub mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
