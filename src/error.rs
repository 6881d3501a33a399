use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("label `{0}` is not part of the ordinal domain")]
    UnknownCategory(String),

    #[error("plugin with id `{0}` is already registered")]
    DuplicatePlugin(String),

    #[error("svg element #{0} does not exist in the chart container")]
    UnknownElement(u64),
}
