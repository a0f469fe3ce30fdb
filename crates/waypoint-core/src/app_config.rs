/// Application configuration, loaded from environment variables.
///
/// See [`crate::load_app_config`] for the variable names and defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,

    pub geocode_token: String,
    pub geocode_base_url: String,
    pub geocode_timeout_secs: u64,

    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}
