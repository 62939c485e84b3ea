//! Tipos de fio da API do Asana
//!
//! Cada registro espelha um recurso JSON. Quase todos os campos são
//! opcionais: a API omite o que não foi pedido em `opt_fields`.

pub mod attachment;
pub mod project;
pub mod task;
pub mod team;
pub mod user;
pub mod workspace;

pub use attachment::{Attachment, AttachmentUpload};
pub use project::{Layout, Project, ProjectQuery, ProjectRequest};
pub use task::{AssigneeStatus, Membership, Task, TaskRequest};
pub use team::{Team, TeamRequest};
pub use user::{User, UserId};
pub use workspace::Workspace;

use serde::{Deserialize, Serialize};

/// Referência compacta a outro recurso (`{"id", "gid", "name"}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedEntity {
    pub fn with_gid(gid: impl Into<String>) -> Self {
        Self {
            gid: Some(gid.into()),
            ..Self::default()
        }
    }

    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Identificador preferido: `gid`, senão `id` numérico
    pub fn identifier(&self) -> Option<String> {
        self.gid
            .clone()
            .filter(|gid| !gid.is_empty())
            .or_else(|| self.id.map(|id| id.to_string()))
    }
}
