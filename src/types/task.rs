//! Tipos de tarefas do Asana

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::NamedEntity;
use crate::codec;
use crate::error::Result;

/// Limite padrão de registros por página nas listagens de tarefas
pub const DEFAULT_TASK_LIMIT: u32 = 20;

/// Campos que a API devolve mas não aceita na escrita
pub const READ_ONLY_FIELDS: &[&str] = &["num_hearts"];

/// Campos que só fazem sentido na query de listagem
pub const QUERY_ONLY_FIELDS: &[&str] = &["limit", "offset"];

/// Em qual seção de "My Tasks" a tarefa aparece para o responsável
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssigneeStatus {
    #[default]
    Inbox,
    Later,
    Today,
    Upcoming,
}

impl AssigneeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssigneeStatus::Inbox => "inbox",
            AssigneeStatus::Later => "later",
            AssigneeStatus::Today => "today",
            AssigneeStatus::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for AssigneeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vínculo de uma tarefa com projeto/seção
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<NamedEntity>,
}

/// Tarefa como devolvida pela API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    // ==================== IDENTIFICAÇÃO ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // ==================== RESPONSÁVEL ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_status: Option<AssigneeStatus>,

    // ==================== ESTADO ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    // ==================== DATAS ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Data de entrega sem horário (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,

    // ==================== RELACIONAMENTOS ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<NamedEntity>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memberships: Option<Vec<Membership>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NamedEntity>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<NamedEntity>>,

    // ==================== SOCIAL ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearts: Option<Vec<NamedEntity>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_hearts: Option<i64>,

    // ==================== EXTRAS ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<JsonValue>>,

    /// Metadados livres de integrações
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<JsonValue>,
}

/// Parâmetros para criar tarefas e filtrar listagens
///
/// Serializado como formulário na criação e como query string nas
/// listagens; campos `None`/vazios não são enviados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    // ==================== PAGINAÇÃO ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    // ==================== FILTROS / ESCOPO ====================
    /// Responsável: id, email ou `me`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(rename = "project", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,

    // ==================== CONTEÚDO ====================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_status: Option<AssigneeStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    /// Seguidores: ids ou emails
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearted: Option<bool>,

    /// Somente leitura na API; removido antes de criar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_hearts: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<JsonValue>,
}

impl TaskRequest {
    /// Filtro de listagem para as tarefas de um projeto
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Preenche `limit` com o padrão quando ausente ou zero
    pub fn fill_with_defaults(&mut self) {
        if self.limit.map_or(true, |limit| limit == 0) {
            self.limit = Some(DEFAULT_TASK_LIMIT);
        }
    }

    /// Pares de query para `GET /tasks`
    pub(crate) fn list_query(&self) -> Result<Vec<(String, String)>> {
        codec::to_form_values(self)
    }

    /// Pares de formulário para `POST /tasks`
    pub(crate) fn create_form(&self) -> Result<Vec<(String, String)>> {
        let mut values = codec::to_form_values(self)?;
        codec::strip_fields(&mut values, READ_ONLY_FIELDS);
        codec::strip_fields(&mut values, QUERY_ONLY_FIELDS);
        Ok(values)
    }
}
