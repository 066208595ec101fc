use config::Config;
use vault::SecretVault;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod vault;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vault: SecretVault,
}
