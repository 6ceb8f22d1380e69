pub mod config;
pub mod params;

pub use config::AppConfig;
pub use params::{load_params_file, parse_param_arg};
