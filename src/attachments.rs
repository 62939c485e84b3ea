//! Operações de anexos

use crate::client::{path_segment, require_id, AsanaClient};
use crate::codec;
use crate::error::{AsanaError, Result};
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::transport::MultipartForm;
use crate::types::{Attachment, AttachmentUpload};

/// Quantos bytes são considerados para detectar o tipo do conteúdo
const SNIFF_LEN: usize = 512;

const OCTET_STREAM: &str = "application/octet-stream";

/// Assinaturas binárias conhecidas (prefixo exato)
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"%!PS-Adobe-", "application/postscript"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"OggS\x00", "application/ogg"),
    (b"ID3", "audio/mpeg"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
    (b"Rar!\x1A\x07", "application/x-rar-compressed"),
    (b"\x00asm", "application/wasm"),
];

/// Prefixos textuais, comparados sem diferenciar maiúsculas e ignorando espaços iniciais
const TEXT_SIGNATURES: &[(&str, &str)] = &[
    ("<?xml", "text/xml; charset=utf-8"),
    ("<!DOCTYPE HTML", "text/html; charset=utf-8"),
    ("<HTML", "text/html; charset=utf-8"),
    ("<HEAD", "text/html; charset=utf-8"),
    ("<BODY", "text/html; charset=utf-8"),
];

/// Detecta o content-type pelos primeiros bytes do arquivo
///
/// Sem assinatura conhecida: `text/plain` se não houver bytes de controle
/// binários, senão `application/octet-stream`.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];
    if head.is_empty() {
        return "text/plain; charset=utf-8";
    }

    if let Some((_, content_type)) = SIGNATURES.iter().find(|(magic, _)| head.starts_with(magic)) {
        return *content_type;
    }

    if head.len() >= 12 && &head[..4] == b"RIFF" {
        match &head[8..12] {
            b"WEBP" => return "image/webp",
            b"WAVE" => return "audio/wave",
            b"AVI " => return "video/avi",
            _ => {}
        }
    }

    let trimmed = trim_leading_whitespace(head);
    for (prefix, content_type) in TEXT_SIGNATURES {
        if trimmed.len() >= prefix.len() && trimmed[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes()) {
            return *content_type;
        }
    }

    if head.starts_with(b"\xEF\xBB\xBF") || !head.iter().any(|b| is_binary_byte(*b)) {
        return "text/plain; charset=utf-8";
    }

    OCTET_STREAM
}

fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

impl AsanaClient {
    pub async fn find_attachment_by_id(&self, attachment_id: &str) -> Result<Attachment> {
        let attachment_id = require_id(attachment_id, "attachmentID")?;
        let body = self
            .get(&format!("/attachments/{}", path_segment(&attachment_id)))
            .await?;

        codec::decode_data(&body).map_err(|e| match e {
            AsanaError::NotFound(_) => AsanaError::NotFound("no attachment was received".to_string()),
            other => other,
        })
    }

    /// Envia um arquivo como anexo de uma tarefa
    ///
    /// Multipart com os campos `file`, `Content-Type` e `name`. Nome vazio
    /// vira um UUID aleatório no campo `file`.
    pub async fn upload_attachment(&self, upload: &AttachmentUpload) -> Result<Attachment> {
        upload.validate()?;

        let task_id = upload.task_id.trim();
        let content_type = detect_content_type(&upload.body);
        let file_name = upload.non_blank_filename();

        tracing::info!(
            "📎 Enviando anexo '{}' ({}, {} bytes) para a tarefa {}",
            file_name,
            content_type,
            upload.body.len(),
            task_id
        );

        let form = MultipartForm::new()
            .file("file", file_name, content_type, upload.body.clone())
            .text("Content-Type", content_type)
            .text("name", upload.name.clone());

        let path = format!("/tasks/{}/attachments", path_segment(task_id));
        let body = self.post_multipart(&path, form).await?;

        codec::decode_data(&body).map_err(|e| match e {
            AsanaError::NotFound(_) => AsanaError::NotFound("no attachment was received".to_string()),
            other => other,
        })
    }

    pub fn list_attachments_for_task(&self, task_id: &str) -> Result<PageStream<Attachment>> {
        let task_id = require_id(task_id, "taskID")?;
        let start = PaginationRequest::new(format!("/tasks/{}/attachments", path_segment(&task_id)));
        Paginator::new(self.clone(), "attachments", start).start()
    }
}
