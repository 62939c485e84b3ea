//! Transporte padrão baseado em reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;

use super::{HttpRequest, HttpResponse, MultipartForm, RequestBody, Transport};
use crate::error::{AsanaError, Result};

/// [`Transport`] implementado com [`reqwest`]
///
/// # Timeouts
///
/// - Total: 30s
/// - Connect: 5s
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(30, 5)
    }

    /// Cria um transporte com timeouts customizados
    pub fn with_timeouts(total_timeout_secs: u64, connect_timeout_secs: u64) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| AsanaError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Reaproveita um `reqwest::Client` já configurado
    pub fn from_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http_client
            .request(request.method, &request.url)
            .headers(request.headers);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(encoded) => builder.body(encoded),
            RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn into_reqwest_form(form: MultipartForm) -> Result<Form> {
    let mut out = Form::new();
    for part in form.parts {
        let mut p = Part::bytes(part.data);
        if let Some(file_name) = part.file_name {
            p = p.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            p = p
                .mime_str(&content_type)
                .map_err(|e| AsanaError::validation_error(format!("Invalid content type: {}", e)))?;
        }
        out = out.part(part.name, p);
    }
    Ok(out)
}

fn map_reqwest_error(err: reqwest::Error) -> AsanaError {
    if err.is_timeout() {
        AsanaError::Timeout(err.to_string())
    } else {
        AsanaError::Transport(err.to_string())
    }
}
