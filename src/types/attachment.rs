//! Tipos de anexos do Asana

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NamedEntity;
use crate::error::{AsanaError, Result};

/// Anexo como devolvido pela API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// URL temporária de download (pode vir `null`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    /// Onde o arquivo está hospedado (`asana`, `dropbox`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Tarefa dona do anexo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NamedEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
}

/// Arquivo a ser anexado a uma tarefa
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub task_id: String,
    /// Nome exibido; vazio gera um nome aleatório
    pub name: String,
    pub body: Vec<u8>,
}

impl AttachmentUpload {
    pub fn new(task_id: impl Into<String>, name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            task_id: task_id.into(),
            name: name.into(),
            body: body.into(),
        }
    }

    /// Lê o arquivo do disco; o nome do anexo é o nome do arquivo
    pub async fn from_path(task_id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = tokio::fs::read(path).await.map_err(|e| {
            AsanaError::validation_error(format!("could not read {}: {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(task_id, name, body))
    }

    pub fn validate(&self) -> Result<()> {
        if self.body.is_empty() {
            return Err(AsanaError::validation_error("expecting a non-empty body"));
        }
        if self.task_id.trim().is_empty() {
            return Err(AsanaError::validation_error("expecting a non-empty taskID"));
        }
        Ok(())
    }

    /// Nome usado no campo `file` do multipart
    pub fn non_blank_filename(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_with_null_fields() {
        let attachment: Attachment = serde_json::from_str(
            r#"{"id": 3, "name": "contrato.pdf", "download_url": null, "host": "asana", "parent": {"id": 9, "name": "Task"}}"#,
        )
        .unwrap();
        assert_eq!(attachment.download_url, None);
        assert_eq!(attachment.host.as_deref(), Some("asana"));
        assert_eq!(attachment.parent.unwrap().id, Some(9));
    }

    #[test]
    fn test_upload_validation() {
        let err = AttachmentUpload::new("t1", "a.txt", Vec::new()).validate().unwrap_err();
        assert_eq!(err.message(), "expecting a non-empty body");

        let err = AttachmentUpload::new("  ", "a.txt", "hi").validate().unwrap_err();
        assert_eq!(err.message(), "expecting a non-empty taskID");

        assert!(AttachmentUpload::new("t1", "", "hi").validate().is_ok());
    }

    #[test]
    fn test_blank_name_gets_random_filename() {
        let upload = AttachmentUpload::new("t1", " ", "hi");
        let first = upload.non_blank_filename();
        let second = upload.non_blank_filename();
        assert!(uuid::Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);

        let upload = AttachmentUpload::new("t1", "notes.txt", "hi");
        assert_eq!(upload.non_blank_filename(), "notes.txt");
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = std::env::temp_dir().join(format!("asana-upload-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let file = dir.join("report.csv");
        tokio::fs::write(&file, b"a,b\n1,2\n").await.unwrap();

        let upload = AttachmentUpload::from_path("t1", &file).await.unwrap();
        assert_eq!(upload.name, "report.csv");
        assert_eq!(upload.body, b"a,b\n1,2\n".to_vec());

        let missing = AttachmentUpload::from_path("t1", dir.join("missing.bin")).await;
        assert!(missing.unwrap_err().is_validation());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
