pub mod config;
pub use config::AppConfig;
pub mod logging;
