pub const DEFAULT_CONFIG_FILE: &str = "trox.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "TROX_";
