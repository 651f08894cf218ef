use crate::auth::TokenService;
use crate::config::ServerConfig;
use shelter_db::CredentialStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state. The signing secret and TTL come from `config.auth`.
    pub fn new(store: Arc<dyn CredentialStore>, config: ServerConfig) -> Self {
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl());
        Self {
            store,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}
