pub mod audio_engine;
pub mod constants;
pub mod layout;
pub mod parameter_store;
pub mod processor;
