use thiserror::Error;

/// Failures while painting annotations or moving pixels in and out of cairo.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface is still borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("raster error: {0}")]
    Raster(String),
}
