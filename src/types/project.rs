//! Tipos de projetos do Asana

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NamedEntity;
use crate::client::require_id;
use crate::codec;
use crate::error::{AsanaError, Result};

/// Layout de exibição do projeto
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    List,
    Board,
}

/// Projeto como devolvido pela API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<NamedEntity>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<NamedEntity>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Parâmetros de criação/atualização de projetos
///
/// `project_id`/`project_gid` vão no path, nunca no formulário.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(skip)]
    pub project_id: Option<String>,

    #[serde(skip)]
    pub project_gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// Imutável depois da criação
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl ProjectRequest {
    /// Valida para criação: `workspace` é obrigatório
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.workspace) {
            return Err(AsanaError::validation_error("expecting a non-empty workspace"));
        }
        Ok(())
    }

    /// Valida para atualização e devolve o id do projeto
    pub(crate) fn validate_update(&self) -> Result<String> {
        let project_id = require_id(self.project_id.as_deref().unwrap_or_default(), "projectID")?;
        if !is_blank(&self.workspace) {
            return Err(AsanaError::validation_error("workspace once set cannot be modified"));
        }
        Ok(project_id)
    }

    /// Valida para add/removeMembers e devolve o gid do projeto
    pub(crate) fn validate_membership(&self) -> Result<String> {
        let target = self
            .project_gid
            .as_deref()
            .filter(|gid| !gid.trim().is_empty())
            .or(self.project_id.as_deref())
            .unwrap_or_default();
        let project_gid = require_id(target, "projectGID")?;

        if self.members.iter().all(|m| m.trim().is_empty()) {
            return Err(AsanaError::validation_error("expecting at least one member"));
        }
        Ok(project_gid)
    }

    pub(crate) fn form(&self) -> Result<Vec<(String, String)>> {
        codec::to_form_values(self)
    }

    pub(crate) fn members_form(&self) -> Vec<(String, String)> {
        let members: Vec<&str> = self
            .members
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();
        vec![("members".to_string(), members.join(","))]
    }
}

/// Filtro para consultar projetos
///
/// Ao menos `workspace` ou `team` precisa estar presente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl ProjectQuery {
    pub fn in_workspace(workspace: impl Into<String>) -> Self {
        Self {
            workspace: Some(workspace.into()),
            ..Self::default()
        }
    }

    pub fn in_team(team: impl Into<String>) -> Self {
        Self {
            team: Some(team.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.workspace) && is_blank(&self.team) {
            return Err(AsanaError::validation_error(
                "expecting at least a workspace or a team filter",
            ));
        }
        Ok(())
    }

    pub(crate) fn query(&self) -> Result<Vec<(String, String)>> {
        codec::to_form_values(self)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_request_requires_workspace() {
        let req = ProjectRequest {
            name: Some("Roadmap".to_string()),
            ..ProjectRequest::default()
        };
        assert!(req.validate().unwrap_err().is_validation());

        let req = ProjectRequest {
            workspace: Some("ws-1".to_string()),
            ..req
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_workspace_change() {
        let req = ProjectRequest {
            project_id: Some("p1".to_string()),
            workspace: Some("ws-2".to_string()),
            ..ProjectRequest::default()
        };
        let err = req.validate_update().unwrap_err();
        assert_eq!(err.message(), "workspace once set cannot be modified");

        let req = ProjectRequest {
            project_id: Some("  ".to_string()),
            ..ProjectRequest::default()
        };
        assert!(req.validate_update().is_err());
    }

    #[test]
    fn test_form_never_carries_path_ids() {
        let req = ProjectRequest {
            project_id: Some("p1".to_string()),
            project_gid: Some("g1".to_string()),
            name: Some("Renamed".to_string()),
            layout: Some(Layout::Board),
            ..ProjectRequest::default()
        };
        let values = req.form().unwrap();
        assert_eq!(
            values,
            vec![
                ("layout".to_string(), "board".to_string()),
                ("name".to_string(), "Renamed".to_string()),
            ]
        );
    }

    #[test]
    fn test_membership_validation() {
        let req = ProjectRequest {
            project_id: Some("p1".to_string()),
            members: vec!["u1".to_string(), " u2 ".to_string()],
            ..ProjectRequest::default()
        };
        assert_eq!(req.validate_membership().unwrap(), "p1");
        assert_eq!(req.members_form(), vec![("members".to_string(), "u1,u2".to_string())]);

        let req = ProjectRequest {
            project_gid: Some("g1".to_string()),
            ..ProjectRequest::default()
        };
        assert!(req.validate_membership().is_err());
    }

    #[test]
    fn test_project_query_validation() {
        assert!(ProjectQuery::default().validate().is_err());
        assert!(ProjectQuery::in_team("t1").validate().is_ok());

        let query = ProjectQuery {
            archived: Some(false),
            ..ProjectQuery::in_workspace("ws-1")
        };
        assert_eq!(
            query.query().unwrap(),
            vec![
                ("archived".to_string(), "false".to_string()),
                ("workspace".to_string(), "ws-1".to_string()),
            ]
        );
    }
}
