//! Transporte em memória para testes
//!
//! Grava cada requisição e devolve respostas enfileiradas. Respostas com
//! rota só casam com URLs que terminam no fragmento informado; as demais
//! casam com qualquer URL, na ordem em que foram enfileiradas.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::error::{AsanaError, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};

struct Scripted {
    route: Option<String>,
    response: Result<HttpResponse>,
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_json(&self, status: StatusCode, body: &str) {
        self.push(None, Ok(HttpResponse::new(status, body.as_bytes().to_vec())));
    }

    pub(crate) fn push_error(&self, error: AsanaError) {
        self.push(None, Err(error));
    }

    pub(crate) fn push_route(&self, route: &str, status: StatusCode, body: &str) {
        self.push(
            Some(route.to_string()),
            Ok(HttpResponse::new(status, body.as_bytes().to_vec())),
        );
    }

    fn push(&self, route: Option<String>, response: Result<HttpResponse>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { route, response });
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let mut script = self.script.lock().unwrap();
        let position = script.iter().position(|entry| match &entry.route {
            Some(route) => url.ends_with(route.as_str()),
            None => true,
        });

        match position.and_then(|index| script.remove(index)) {
            Some(entry) => entry.response,
            None => Err(AsanaError::transport(format!("no scripted response for {}", url))),
        }
    }
}

/// Body de uma página no envelope da API
pub(crate) fn page_body(data: Value, next_path: Option<&str>) -> String {
    match next_path {
        Some(path) => json!({
            "data": data,
            "next_page": { "offset": "cursor", "path": path, "uri": format!("https://app.asana.com/api/1.0{}", path) }
        }),
        None => json!({ "data": data, "next_page": null }),
    }
    .to_string()
}
