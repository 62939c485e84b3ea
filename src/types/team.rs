//! Tipos de times do Asana

use serde::{Deserialize, Serialize};

use super::NamedEntity;
use crate::client::require_id;
use crate::codec;
use crate::error::{AsanaError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<NamedEntity>,
}

/// Parâmetros das operações de time
///
/// `team_id` e `user_id` vão no path; só `organization` segue como query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequest {
    #[serde(skip)]
    pub team_id: String,

    /// Id, email ou `me`
    #[serde(skip)]
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl TeamRequest {
    pub fn new(team_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            user_id: user_id.into(),
            organization: None,
        }
    }

    /// Filtro de times de um usuário dentro de uma organização
    pub fn for_user(user_id: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            team_id: String::new(),
            user_id: user_id.into(),
            organization: Some(organization.into()),
        }
    }

    /// Exige `team_id` e `user_id`; devolve ambos normalizados
    pub fn validate(&self) -> Result<(String, String)> {
        if self.team_id.trim().is_empty() {
            return Err(AsanaError::validation_error("empty teamID passed in"));
        }
        if self.user_id.trim().is_empty() {
            return Err(AsanaError::validation_error("empty userID passed in"));
        }
        Ok((self.team_id.trim().to_string(), self.user_id.trim().to_string()))
    }

    pub(crate) fn require_user(&self) -> Result<String> {
        require_id(&self.user_id, "userID")
    }

    pub(crate) fn query(&self) -> Result<Vec<(String, String)>> {
        codec::to_form_values(self)
    }
}
