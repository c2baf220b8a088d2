mod loader;
mod types;

pub use loader::{default_options_path, load_options_from, ConfigError};
pub use types::ArgsFile;
