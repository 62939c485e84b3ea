use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Instala um subscriber `fmt` com `EnvFilter`
///
/// `RUST_LOG` tem precedência sobre `default_filter`. Chamadas repetidas são
/// ignoradas.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn log_request(method: &str, url: &str) {
    debug!("{} {}", method, url);
}

pub fn log_api_error(url: &str, status: u16, error: &str) {
    error!("Asana API error: {} - Status: {} - Error: {}", url, status, error);
}

pub fn log_pagination_started(resource: &str, path: &str) {
    info!("📄 Paginação de {} iniciada em {}", resource, path);
}

pub fn log_page_emitted(resource: &str, page_number: usize, records: usize) {
    debug!("Página {} de {} entregue ({} registros)", page_number, resource, records);
}

pub fn log_pagination_finished(resource: &str, pages: usize) {
    info!("✅ Paginação de {} concluída após {} páginas", resource, pages);
}

pub fn log_pagination_cancelled(resource: &str, pages: usize) {
    warn!("⏹️ Paginação de {} cancelada após {} páginas", resource, pages);
}

pub fn log_pagination_error(resource: &str, error: &str) {
    warn!("❌ Paginação de {} encerrada com erro: {}", resource, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("asana=debug");
        init_tracing("asana=trace");
        log_request("GET", "https://app.asana.com/api/1.0/workspaces");
    }
}
