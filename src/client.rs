//! Cliente HTTP autenticado para a API do Asana

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::codec;
use crate::config::{ClientConfig, Settings, DEFAULT_BASE_URL, ENV_PAT_KEY};
use crate::error::{AsanaError, Result};
use crate::logging::{log_api_error, log_request};
use crate::transport::{HttpRequest, MultipartForm, ReqwestTransport, RequestBody, Transport};

pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

struct ClientInner {
    base_url: String,
    total_timeout_secs: u64,
    connect_timeout_secs: u64,
    config: RwLock<ClientConfig>,
    default_transport: OnceCell<Arc<dyn Transport>>,
}

/// Cliente para interagir com a API do Asana
///
/// Barato de clonar (`Arc` interno) e seguro para uso concorrente: várias
/// paginações podem rodar ao mesmo tempo sobre o mesmo cliente, todas lendo
/// token e transporte via `RwLock`.
#[derive(Clone)]
pub struct AsanaClient {
    inner: Arc<ClientInner>,
}

impl AsanaClient {
    /// Cria um novo cliente
    ///
    /// Usa o primeiro token não vazio de `tokens`; se nenhum for passado,
    /// procura `ASANA_PERSONAL_ACCESS_TOKEN` no ambiente.
    ///
    /// # Erros
    ///
    /// `ConfigError` quando nenhum token é encontrado.
    pub fn new(tokens: &[&str]) -> Result<Self> {
        let token = match first_non_empty(tokens) {
            Some(token) => token,
            None => std::env::var(ENV_PAT_KEY)
                .ok()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AsanaError::config_error(format!("{:?} was not set in your environment", ENV_PAT_KEY))
                })?,
        };

        Ok(Self::with_config(ClientConfig::new(token)))
    }

    /// Cria um cliente a partir de [`Settings`]
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let token = settings
            .personal_access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AsanaError::config_error(format!("{:?} was not set in your environment", ENV_PAT_KEY))
            })?;

        Ok(Self::build(
            &settings.base_url,
            settings.timeout_secs,
            settings.connect_timeout_secs,
            ClientConfig::new(token),
        ))
    }

    /// Cria um cliente com configuração explícita e URL base padrão
    pub fn with_config(config: ClientConfig) -> Self {
        Self::build(DEFAULT_BASE_URL, 30, 5, config)
    }

    /// Troca a URL base (proxies, servidores de teste)
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self::build(
            base_url,
            self.inner.total_timeout_secs,
            self.inner.connect_timeout_secs,
            self.config(),
        )
    }

    fn build(base_url: &str, total_timeout_secs: u64, connect_timeout_secs: u64, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                total_timeout_secs,
                connect_timeout_secs,
                config: RwLock::new(config),
                default_transport: OnceCell::new(),
            }),
        }
    }

    /// Snapshot da configuração atual
    pub fn config(&self) -> ClientConfig {
        self.inner
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Substitui toda a configuração
    pub fn set_config(&self, config: ClientConfig) {
        *self
            .inner
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self
            .inner
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.token = token.into();
    }

    /// Troca o transporte usado pelas próximas requisições
    pub fn set_transport(&self, transport: Arc<dyn Transport>) {
        let mut guard = self
            .inner
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.transport = Some(transport);
    }

    /// Obtém a URL base
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Constrói URL completa a partir de um path (`/tasks?...`)
    ///
    /// URLs absolutas são devolvidas como estão.
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    fn transport_for(&self, config: &ClientConfig) -> Result<Arc<dyn Transport>> {
        if let Some(ref transport) = config.transport {
            return Ok(transport.clone());
        }

        self.inner
            .default_transport
            .get_or_try_init(|| {
                let transport = ReqwestTransport::with_timeouts(
                    self.inner.total_timeout_secs,
                    self.inner.connect_timeout_secs,
                )?;
                Ok::<Arc<dyn Transport>, AsanaError>(Arc::new(transport))
            })
            .cloned()
    }

    /// Executa uma requisição autenticada
    ///
    /// Anexa `Authorization: Bearer <token>`, envia pelo transporte e
    /// devolve `(body, headers)` para status 2xx.
    ///
    /// # Erros
    ///
    /// - `Http { status, message }`: status não-2xx; `message` é o body da
    ///   resposta quando não vazio, senão a linha de status
    /// - `Transport`/`Timeout`: falhas do transporte, repassadas como estão
    pub async fn execute(&self, mut request: HttpRequest) -> Result<(Vec<u8>, HeaderMap)> {
        let config = self.config();
        let transport = self.transport_for(&config)?;

        let auth = HeaderValue::from_str(&config.bearer())
            .map_err(|e| AsanaError::config_error(format!("Invalid token: {}", e)))?;
        request.headers.insert(AUTHORIZATION, auth);

        log_request(request.method.as_str(), &request.url);

        let url = request.url.clone();
        let response = transport.send(request).await?;

        if response.status.is_success() {
            return Ok((response.body, response.headers));
        }

        let body = String::from_utf8_lossy(&response.body).trim().to_string();
        let message = if body.is_empty() { response.status_line() } else { body };

        log_api_error(&url, response.status.as_u16(), &message);

        Err(AsanaError::Http {
            status: response.status.as_u16(),
            message,
        })
    }

    /// Executa uma requisição GET
    pub(crate) async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let request = HttpRequest::new(Method::GET, self.build_url(path));
        let (body, _) = self.execute(request).await?;
        Ok(body)
    }

    /// Executa uma requisição GET e decodifica o envelope `{"data": ...}`
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get(path).await?;
        codec::decode_data(&body)
    }

    /// Executa uma requisição DELETE
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = HttpRequest::new(Method::DELETE, self.build_url(path));
        self.execute(request).await?;
        Ok(())
    }

    /// Envia um formulário urlencoded (POST/PUT)
    pub(crate) async fn send_form(
        &self,
        method: Method,
        path: &str,
        values: &[(String, String)],
    ) -> Result<Vec<u8>> {
        let mut request = HttpRequest::new(method, self.build_url(path))
            .with_body(RequestBody::Form(codec::encode_form(values)));
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let (body, _) = self.execute(request).await?;
        Ok(body)
    }

    /// Envia um formulário multipart (POST)
    pub(crate) async fn post_multipart(&self, path: &str, form: MultipartForm) -> Result<Vec<u8>> {
        let request = HttpRequest::new(Method::POST, self.build_url(path))
            .with_body(RequestBody::Multipart(form));
        let (body, _) = self.execute(request).await?;
        Ok(body)
    }
}

impl std::fmt::Debug for AsanaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaClient")
            .field("base_url", &self.inner.base_url)
            .finish()
    }
}

fn first_non_empty(tokens: &[&str]) -> Option<String> {
    tokens
        .iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Valida e normaliza um identificador obrigatório
pub(crate) fn require_id(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AsanaError::validation_error(format!("expecting a non-empty {}", what)));
    }
    Ok(trimmed.to_string())
}

/// Codifica um identificador para uso como segmento de path
pub(crate) fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
