//! Parameter and plugin identity constants
//! Kept apart from the plugin shell so the engine can be built without a host

use crate::audio::parameter_store::ParameterDescriptor;

/// Gain parameter range
pub const GAIN_MIN_DB: f32 = -48.0;
pub const GAIN_MAX_DB: f32 = 0.0;

/// The one and only default. The registered parameter and the store both start here.
pub const GAIN_DEFAULT_DB: f32 = -15.0;

/// Host-facing id. Must stay constant across releases or saved automation breaks.
pub const GAIN_ID: &str = "gain";
pub const GAIN_NAME: &str = "Gain";

pub const GAIN_DESCRIPTOR: ParameterDescriptor = ParameterDescriptor::new(
    GAIN_ID,
    GAIN_NAME,
    GAIN_MIN_DB,
    GAIN_MAX_DB,
    GAIN_DEFAULT_DB,
);

pub const PLUGIN_NAME: &str = "Gain Tutorial";

/// The gain transform has no memory, so nothing rings out after the input stops
pub const TAIL_LENGTH_SECONDS: f64 = 0.0;

/// Editor window size
pub const EDITOR_WIDTH: u32 = 240;
pub const EDITOR_HEIGHT: u32 = 150;
