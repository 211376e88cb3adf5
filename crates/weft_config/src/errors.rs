#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read weft.toml: {0}")]
    ConfigReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}. Expected one of: 1, true, yes, 0, false, no")]
    InvalidEnvValue { var: String, value: String },
}
