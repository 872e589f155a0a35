// Configuration module.
// Settings file parsing and filesystem locations for config and logs.

pub mod paths;
pub mod settings;

pub use settings::Settings;
