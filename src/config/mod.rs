pub mod run_configuration;
pub mod settings;

pub use run_configuration::{FailurePolicy, RunConfiguration};
pub use settings::load_settings;
