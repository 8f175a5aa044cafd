use thiserror::Error;

/// Errors raised while validating input or building a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SpongeError {
    #[error("Initial cube size must be finite and positive, got {0}")]
    InvalidSize(f64),

    #[error("Fractal level {level} exceeds the maximum of {max}")]
    LevelTooDeep { level: u32, max: u32 },

    #[error("Canvas dimensions must be non-zero, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Invalid scene config: {0}")]
    InvalidConfig(String),
}
