//! Tipos de erro para o crate asana

use thiserror::Error;

/// Erros do cliente Asana
///
/// Existem dois canais de falha:
/// - **Síncrono**: `ConfigError` e `ValidationError` são retornados antes de
///   qualquer atividade de rede.
/// - **Em banda**: os demais chegam como erro terminal de uma [`Page`](crate::pagination::Page)
///   (ou como `Err` nas operações não paginadas).
#[derive(Debug, Error)]
pub enum AsanaError {
    /// Erro de configuração (credencial ausente, settings inválidos)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Erro de validação de requisição
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Falha de transporte (conexão, leitura do body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Timeout imposto pelo transporte
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Erro da API do Asana (status code não-2xx)
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Body não corresponde ao envelope esperado
    #[error("Decode error: {0}")]
    Decode(String),

    /// Envelope válido mas sem o recurso esperado
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl AsanaError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Código HTTP, apenas para erros `Http`
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Mensagem legível, sem o prefixo da variante
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigError(msg)
            | Self::ValidationError(msg)
            | Self::Transport(msg)
            | Self::Timeout(msg)
            | Self::Decode(msg)
            | Self::NotFound(msg) => msg,
            Self::Http { message, .. } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<serde_json::Error> for AsanaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for AsanaError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, AsanaError>;
