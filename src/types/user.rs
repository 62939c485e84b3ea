//! Tipos de usuários do Asana

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::NamedEntity;

/// Alias aceito pela API para o dono do token
pub const ME: &str = "me";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<NamedEntity>>,
}

/// Identificador de usuário em paths e formulários
///
/// Id vazio equivale a `me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UserId {
    #[default]
    Me,
    Id(String),
}

impl UserId {
    pub fn me() -> Self {
        UserId::Me
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserId::Me => ME,
            UserId::Id(id) => id,
        }
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ME {
            UserId::Me
        } else {
            UserId::Id(trimmed.to_string())
        }
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId::from(value.as_str())
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Id(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
