//! Paginação baseada em cursor, entregue como stream assíncrono
//!
//! Cada listagem dispara um produtor independente (task Tokio) que executa o
//! ciclo:
//!
//! ```text
//! Fetching → Decoding → Emitting → (Continuing → Fetching | Terminated)
//! ```
//!
//! - As páginas chegam ao consumidor na ordem exata das requisições; nunca há
//!   duas requisições simultâneas para a mesma paginação.
//! - O produtor só busca a página N+1 depois que o consumidor aceitou a
//!   página N (backpressure).
//! - Erros (transporte, HTTP, decode) chegam como uma última [`Page`] com
//!   `error` preenchido; em seguida o canal fecha.
//! - `next_page.path` vazio ou ausente encerra a paginação sem erro.
//! - [`CancelHandle::cancel`] é consultado antes de cada requisição; uma
//!   requisição já em andamento não é interrompida.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::client::AsanaClient;
use crate::codec;
use crate::error::{AsanaError, Result};
use crate::logging::{
    log_page_emitted, log_pagination_cancelled, log_pagination_error, log_pagination_finished,
    log_pagination_started,
};

/// Cursor de continuação devolvido pela API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl NextPage {
    /// Path da próxima página, se houver um utilizável
    ///
    /// Um `offset` sem `path` NÃO conta como próxima página.
    pub fn usable_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

/// Uma página de registros
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Erro terminal; quando presente, o stream termina nesta página
    pub error: Option<AsanaError>,
    pub next_page: Option<NextPage>,
}

impl<T> Page<T> {
    /// Página vazia carregando apenas um erro
    pub fn failed(error: AsanaError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
            next_page: None,
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Path da próxima página; sempre `None` se a página tem erro
    pub fn next_path(&self) -> Option<&str> {
        if self.error.is_some() {
            return None;
        }
        self.next_page.as_ref().and_then(NextPage::usable_path)
    }

    /// Converte em `Result`, descartando registros parciais em caso de erro
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Requisição inicial de uma paginação: path + query já codificada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    path: String,
}

impl PaginationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn with_query(path: &str, query: &[(String, String)]) -> Self {
        Self::new(codec::with_query(path, query))
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Sinal de cancelamento (apenas escrita para o chamador)
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pede ao produtor que pare antes da próxima requisição
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Lado consumidor de uma paginação
///
/// Dropar o stream também encerra o produtor.
#[derive(Debug)]
pub struct PageStream<T> {
    receiver: mpsc::Receiver<Page<T>>,
    cancel: CancelHandle,
}

impl<T: Send + 'static> PageStream<T> {
    /// Próxima página; `None` quando a paginação terminou
    pub async fn recv(&mut self) -> Option<Page<T>> {
        self.receiver.recv().await
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Adapta para `futures_util::Stream`
    pub fn into_stream(self) -> impl Stream<Item = Page<T>> + Send {
        futures_util::stream::unfold(self, |mut stream| async move {
            stream.recv().await.map(|page| (page, stream))
        })
    }

    /// Consome todas as páginas; o primeiro erro em banda é devolvido
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(page) = self.recv().await {
            if let Some(err) = page.error {
                return Err(err);
            }
            all.extend(page.items);
        }
        Ok(all)
    }
}

/// Decodifica o body de uma resposta em uma página
pub type PageDecoder<T> = fn(&[u8]) -> Page<T>;

/// Motor genérico de paginação
///
/// Parametrizado pelo path inicial e pela função de decode; cada tipo de
/// recurso é apenas uma instância (`Paginator<Task>`, `Paginator<Team>`...).
pub struct Paginator<T> {
    client: AsanaClient,
    resource: &'static str,
    request: PaginationRequest,
    decode: PageDecoder<T>,
}

impl<T: DeserializeOwned + Send + 'static> Paginator<T> {
    pub fn new(client: AsanaClient, resource: &'static str, request: PaginationRequest) -> Self {
        Self {
            client,
            resource,
            request,
            decode: codec::decode_page::<T>,
        }
    }

    pub fn with_decoder(mut self, decode: PageDecoder<T>) -> Self {
        self.decode = decode;
        self
    }

    /// Dispara o produtor na runtime Tokio atual
    ///
    /// # Erros
    ///
    /// `ConfigError` se chamado fora de uma runtime Tokio.
    pub fn start(self) -> Result<PageStream<T>> {
        let handle = Handle::try_current()
            .map_err(|e| AsanaError::config_error(format!("pagination requires a Tokio runtime: {}", e)))?;

        let (sender, receiver) = mpsc::channel(1);
        let cancel = CancelHandle::new();

        handle.spawn(self.run(sender, cancel.clone()));

        Ok(PageStream { receiver, cancel })
    }

    async fn run(self, sender: mpsc::Sender<Page<T>>, cancel: CancelHandle) {
        let mut path = self.request.path;
        let mut delivered = 0usize;

        log_pagination_started(self.resource, &path);

        loop {
            if cancel.is_cancelled() {
                log_pagination_cancelled(self.resource, delivered);
                return;
            }

            let body = match self.client.get(&path).await {
                Ok(body) => body,
                Err(err) => {
                    log_pagination_error(self.resource, &err.to_string());
                    let _ = sender.send(Page::failed(err)).await;
                    return;
                }
            };

            let page = (self.decode)(&body);
            let next_path = page.next_path().map(str::to_string);
            let decode_error = page.error.as_ref().map(ToString::to_string);
            let records = page.items.len();

            if sender.send(page).await.is_err() {
                tracing::debug!("Consumidor de {} descartou o stream", self.resource);
                return;
            }
            delivered += 1;
            log_page_emitted(self.resource, delivered, records);

            if let Some(err) = decode_error {
                log_pagination_error(self.resource, &err);
                return;
            }

            let Some(next) = next_path else {
                log_pagination_finished(self.resource, delivered);
                return;
            };

            // Capacidade 1: a reserva só sai quando a página anterior foi recebida
            match sender.reserve().await {
                Ok(permit) => drop(permit),
                Err(_) => return,
            }

            path = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_body, ScriptedTransport};
    use futures_util::StreamExt;
    use reqwest::StatusCode;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn client_with(transport: &Arc<ScriptedTransport>) -> AsanaClient {
        let client = AsanaClient::new(&["pa-token-1"]).unwrap();
        client.set_transport(transport.clone());
        client
    }

    fn items(ids: &[u32]) -> serde_json::Value {
        json!(ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>())
    }

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_pages_arrive_in_fetch_order() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1, 2]), Some("/items?offset=a")));
        transport.push_json(StatusCode::OK, &page_body(items(&[3]), Some("/items?offset=b")));
        transport.push_json(StatusCode::OK, &page_body(items(&[4, 5]), None));

        let client = client_with(&transport);
        let mut stream = Paginator::<Item>::new(client, "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let mut seen = Vec::new();
        let mut pages = 0;
        while let Some(page) = stream.recv().await {
            assert!(page.error.is_none());
            pages += 1;
            seen.extend(page.items.into_iter().map(|i| i.id));
        }

        assert_eq!(pages, 3);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://app.asana.com/api/1.0/items",
                "https://app.asana.com/api/1.0/items?offset=a",
                "https://app.asana.com/api/1.0/items?offset=b",
            ]
        );
    }

    #[tokio::test]
    async fn test_http_error_is_single_terminal_page() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::UNAUTHORIZED, r#"{"errors":[{"message":"Not Authorized"}]}"#);

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let page = stream.recv().await.unwrap();
        let err = page.error.unwrap();
        assert_eq!(err.status_code(), Some(401));
        assert!(page.items.is_empty());

        assert!(stream.recv().await.is_none());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_page_after_error() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1]), Some("/items?offset=a")));
        transport.push_json(StatusCode::INTERNAL_SERVER_ERROR, "");
        transport.push_json(StatusCode::OK, &page_body(items(&[2]), None));

        let stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let pages: Vec<Page<Item>> = stream.into_stream().collect().await;
        assert_eq!(pages.len(), 2);
        assert!(pages[0].error.is_none());
        assert_eq!(pages[1].error.as_ref().unwrap().status_code(), Some(500));
        assert_eq!(pages[1].error.as_ref().unwrap().message(), "500 Internal Server Error");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_terminates_stream() {
        let transport = ScriptedTransport::new();
        transport.push_error(AsanaError::transport("connection refused"));

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let page = stream.recv().await.unwrap();
        assert!(page.error.unwrap().is_transport());
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_decode_error_emits_partial_page_then_stops() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            StatusCode::OK,
            r#"{"data": [{"id": 1}, {"id": "bad"}], "next_page": {"path": "/items?offset=a"}}"#,
        );

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let page = stream.recv().await.unwrap();
        assert_eq!(page.items, vec![Item { id: 1 }]);
        assert!(matches!(page.error, Some(AsanaError::Decode(_))));
        assert!(stream.recv().await.is_none());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_offset_without_path_ends_pagination() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            StatusCode::OK,
            r#"{"data": [{"id": 1}], "next_page": {"offset": "eyJ0", "path": "", "uri": ""}}"#,
        );

        let stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let all = stream.collect_all().await.unwrap();
        assert_eq!(all, vec![Item { id: 1 }]);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_cancel_before_first_fetch() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1]), None));

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();
        stream.cancel_handle().cancel();

        assert!(stream.recv().await.is_none());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_between_pages() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1]), Some("/items?offset=a")));
        transport.push_json(StatusCode::OK, &page_body(items(&[2]), None));

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        let first = stream.recv().await.unwrap();
        assert_eq!(first.items, vec![Item { id: 1 }]);
        stream.cancel();

        assert!(stream.recv().await.is_none());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_producer_waits_for_consumer() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1]), Some("/items?offset=a")));
        transport.push_json(StatusCode::OK, &page_body(items(&[2]), Some("/items?offset=b")));
        transport.push_json(StatusCode::OK, &page_body(items(&[3]), None));

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();

        settle().await;
        assert_eq!(transport.calls(), 1);

        stream.recv().await.unwrap();
        settle().await;
        assert_eq!(transport.calls(), 2);

        stream.recv().await.unwrap();
        stream.recv().await.unwrap();
        assert!(stream.recv().await.is_none());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_dropping_stream_stops_producer() {
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &page_body(items(&[1]), Some("/items?offset=a")));
        transport.push_json(StatusCode::OK, &page_body(items(&[2]), None));

        let mut stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .start()
            .unwrap();
        stream.recv().await.unwrap();
        drop(stream);

        settle().await;
        assert!(transport.calls() <= 2);
        settle().await;
        let calls = transport.calls();
        settle().await;
        assert_eq!(transport.calls(), calls);
    }

    #[tokio::test]
    async fn test_concurrent_runs_on_same_client() {
        let transport = ScriptedTransport::new();
        transport.push_route("/left", StatusCode::OK, &page_body(items(&[1]), Some("/left?offset=x")));
        transport.push_route("/right", StatusCode::OK, &page_body(items(&[10]), Some("/right?offset=y")));
        transport.push_route("/left?offset=x", StatusCode::OK, &page_body(items(&[2]), None));
        transport.push_route("/right?offset=y", StatusCode::OK, &page_body(items(&[20]), None));

        let client = client_with(&transport);
        let left = Paginator::<Item>::new(client.clone(), "left", PaginationRequest::new("/left"))
            .start()
            .unwrap();
        let right = Paginator::<Item>::new(client, "right", PaginationRequest::new("/right"))
            .start()
            .unwrap();

        let (left, right) = tokio::join!(left.collect_all(), right.collect_all());
        assert_eq!(left.unwrap(), vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(right.unwrap(), vec![Item { id: 10 }, Item { id: 20 }]);
    }

    #[tokio::test]
    async fn test_custom_decoder() {
        fn always_empty(_: &[u8]) -> Page<Item> {
            Page {
                items: Vec::new(),
                error: None,
                next_page: None,
            }
        }

        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, "whatever");

        let stream = Paginator::<Item>::new(client_with(&transport), "items", PaginationRequest::new("/items"))
            .with_decoder(always_empty)
            .start()
            .unwrap();
        assert!(stream.collect_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let client = AsanaClient::new(&["t"]).unwrap();
        let result = Paginator::<Item>::new(client, "items", PaginationRequest::new("/items")).start();
        assert!(matches!(result, Err(AsanaError::ConfigError(_))));
    }

    #[test]
    fn test_next_page_usable_path() {
        let np = NextPage {
            offset: Some("abc".to_string()),
            path: Some("  ".to_string()),
            uri: None,
        };
        assert_eq!(np.usable_path(), None);

        let np = NextPage {
            path: Some("/tasks?offset=abc".to_string()),
            ..NextPage::default()
        };
        assert_eq!(np.usable_path(), Some("/tasks?offset=abc"));
    }
}
