pub mod color;
pub mod config;
pub mod settings;
pub mod style;
