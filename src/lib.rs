//! Cliente assíncrono da API REST do Asana
//!
//! Este crate fornece uma interface tipo-segura para tarefas, projetos,
//! times, usuários, workspaces e anexos do Asana, com:
//!
//! - Paginação por cursor entregue como stream ([`PageStream`]), com
//!   backpressure e cancelamento cooperativo
//! - Transporte plugável ([`transport::Transport`]) trocável em tempo de
//!   execução, com reqwest como padrão
//! - Validação síncrona: entradas inválidas viram `Err` antes de qualquer
//!   requisição
//!
//! # Erros em duas vias
//!
//! Cada listagem devolve `Result<PageStream<T>>`. O `Err` imediato cobre
//! validação; falhas de rede, HTTP ou decode chegam dentro do stream como
//! a última [`Page`] (com `error` preenchido), e o stream então fecha.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use asana::{AsanaClient, TaskRequest};
//!
//! #[tokio::main]
//! async fn main() -> asana::Result<()> {
//!     // Lê ASANA_PERSONAL_ACCESS_TOKEN quando nenhum token é passado
//!     let client = AsanaClient::new(&[])?;
//!
//!     let request = TaskRequest::default().with_workspace("331727068525363");
//!     let mut pages = client.list_my_tasks(Some(&request))?;
//!
//!     while let Some(page) = pages.recv().await {
//!         if let Some(err) = page.error {
//!             eprintln!("falhou: {}", err);
//!             break;
//!         }
//!         for task in page.items {
//!             println!("{:?}", task.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Módulos públicos
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod transport;
pub mod types;

// Operações por recurso (blocos `impl AsanaClient`)
pub mod attachments;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;
pub mod workspaces;

#[cfg(test)]
mod testing;

// Re-exports principais
pub use client::AsanaClient;
pub use config::{ClientConfig, Settings};
pub use error::{AsanaError, Result};
pub use pagination::{CancelHandle, NextPage, Page, PageStream, PaginationRequest, Paginator};
pub use types::{
    AssigneeStatus, Attachment, AttachmentUpload, Layout, Membership, NamedEntity, Project,
    ProjectQuery, ProjectRequest, Task, TaskRequest, Team, TeamRequest, User, UserId, Workspace,
};
