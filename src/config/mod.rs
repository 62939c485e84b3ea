pub mod settings;

pub use settings::{Settings, DEFAULT_BASE_URL, ENV_PAT_KEY};

use std::fmt;
use std::sync::Arc;

use crate::transport::Transport;

/// Configuração mutável do cliente em tempo de execução
///
/// Fica atrás de um `RwLock` dentro do [`AsanaClient`](crate::AsanaClient):
/// cada requisição lê um snapshot consistente (token + transporte), mas uma
/// paginação já em andamento pode passar a usar o transporte novo no meio do
/// caminho.
#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    /// `None` usa o transporte padrão (reqwest)
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            transport: None,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Valor do header `Authorization`
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"***")
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_value() {
        let cfg = ClientConfig::new("pa-token-1");
        assert_eq!(cfg.bearer(), "Bearer pa-token-1");
    }

    #[test]
    fn test_debug_hides_token() {
        let cfg = ClientConfig::new("secret");
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("custom_transport: false"));
    }
}
