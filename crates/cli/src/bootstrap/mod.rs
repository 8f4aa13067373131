pub mod config;
pub mod input;
pub mod logging;
pub mod servers;

pub use config::{load_config, log_summary};
pub use input::read_input;
pub use logging::init_logging;
pub use servers::collect_servers;
