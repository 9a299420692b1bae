//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::PassbookPaths;
pub use settings::Settings;
