use life_grid::LifeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixels error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("pixel buffer resize failed: {0}")]
    Texture(#[from] pixels::TextureError),

    #[error(transparent)]
    Life(#[from] LifeError),
}
