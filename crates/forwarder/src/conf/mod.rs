//! Conf module — configuration model, default lookup tables, and loading.

pub mod model;
pub mod tables;
pub mod load;

pub use model::{
    CategoryType, EventDefaults, ForwarderConfig, LogFormat, LoggingConfig, MappingConfig,
    MispConfig, ParserConfig, RetryConfig,
};
pub use load::ConfigError;
