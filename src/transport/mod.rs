//! Camada de transporte plugável
//!
//! O cliente nunca fala com a rede diretamente: toda requisição passa por um
//! [`Transport`], que pode ser trocado em tempo de execução (ex.: testes).
//! Quando nenhum é configurado, [`ReqwestTransport`] é usado.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::error::Result;

/// Body de uma requisição
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` já codificado
    Form(String),
    /// `multipart/form-data`; o content-type (com boundary) fica a cargo do transporte
    Multipart(MultipartForm),
}

/// Formulário multipart em memória
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

/// Uma parte de um formulário multipart
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub data: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona um campo de texto
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            data: value.into().into_bytes(),
            file_name: None,
            content_type: None,
        });
        self
    }

    /// Adiciona um arquivo
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            data,
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
        });
        self
    }

    /// Busca uma parte pelo nome do campo
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Requisição HTTP a ser enviada por um [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// URL completa
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Resposta HTTP devolvida por um [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Linha de status no formato `"401 Unauthorized"`
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}

/// Capacidade de executar uma requisição HTTP
///
/// Falhas de conexão ou de leitura do body devem virar
/// `AsanaError::Transport`/`AsanaError::Timeout`; status não-2xx NÃO são erro
/// aqui, quem interpreta o status é o cliente.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
