//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CajaPaths;
pub use settings::Settings;
