use thiserror::Error;

#[derive(Error, Debug)]
pub enum LbError {
    #[error("API error: {0}")]
    Api(#[from] slb_api::ApiError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Core domain error: {0}")]
    Core(#[from] slb_core::CoreError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found")]
    NotFound,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("INI parsing error: {0}")]
    IniError(String),
}

pub type Result<T> = std::result::Result<T, LbError>;
