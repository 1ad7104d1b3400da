use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Range fitting needs at least one finite, non-null value.
    #[error("scale range requires at least one finite value")]
    EmptyValues,

    #[error("scale layout did not converge after {passes} passes")]
    LayoutDidNotConverge { passes: usize },

    #[error("drawing backend error: {0}")]
    Backend(String),
}
