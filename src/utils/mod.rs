pub mod environment;
pub mod terminal;

pub use environment::{default_token_path, get_cache_dir, get_config_dir};
pub use terminal::sanitize_for_terminal;
