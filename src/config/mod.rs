//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::SpendwatchPaths;
pub use settings::Settings;
