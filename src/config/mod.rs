pub mod cli;
pub mod config_manager;

pub use cli::CliArgs;
pub use config_manager::ConfigManager;
