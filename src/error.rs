use thiserror::Error;

/// Configuration errors raised while declaring a parameter.
///
/// These surface at plugin load time and have no recovery path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("parameter '{id}' has an inverted range: min {min} > max {max}")]
    InvertedRange { id: &'static str, min: f32, max: f32 },

    #[error("parameter '{id}' default {default} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        id: &'static str,
        default: f32,
        min: f32,
        max: f32,
    },

    #[error("parameter '{id}' has a non-finite bound or default")]
    NonFiniteBound { id: &'static str },
}
