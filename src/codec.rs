//! Codecs entre o formato de fio (JSON / form-urlencoded) e os tipos do crate
//!
//! Toda resposta do Asana vem num envelope:
//!
//! ```json
//! {"data": ..., "next_page": {"offset": "...", "path": "...", "uri": "..."}}
//! ```
//!
//! Requisições de escrita usam `application/x-www-form-urlencoded`, montado a
//! partir da serialização serde dos tipos `*Request`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AsanaError, Result};
use crate::pagination::{NextPage, Page};

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: Option<T>,
}

/// Decodifica um envelope `{"data": <T>}`
///
/// `data` ausente ou `null` resulta em `NotFound`.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: DataEnvelope<T> = serde_json::from_slice(body)?;
    envelope
        .data
        .ok_or_else(|| AsanaError::NotFound("no data was received".to_string()))
}

/// Decodifica um envelope de listagem em uma [`Page`]
///
/// Os registros são decodificados um a um: se o N-ésimo falhar, a página
/// volta com os N-1 anteriores e o erro preenchido (sem cursor).
pub fn decode_page<T: DeserializeOwned>(body: &[u8]) -> Page<T> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return Page::failed(e.into()),
    };

    let Value::Object(mut envelope) = value else {
        return Page::failed(AsanaError::decode("expected a JSON object envelope"));
    };

    let records = match envelope.remove("data") {
        Some(Value::Array(records)) => records,
        Some(Value::Null) => Vec::new(),
        Some(_) => return Page::failed(AsanaError::decode("\"data\" is not an array")),
        None => return Page::failed(AsanaError::decode("missing \"data\" field")),
    };

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<T>(record) {
            Ok(item) => items.push(item),
            Err(e) => {
                return Page {
                    items,
                    error: Some(AsanaError::decode(format!("record {}: {}", index, e))),
                    next_page: None,
                };
            }
        }
    }

    let next_page = match envelope.remove("next_page") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<NextPage>(raw) {
            Ok(next_page) => Some(next_page),
            Err(e) => {
                return Page {
                    items,
                    error: Some(AsanaError::decode(format!("next_page: {}", e))),
                    next_page: None,
                };
            }
        },
    };

    Page {
        items,
        error: None,
        next_page,
    }
}

/// Achata um registro serializável em pares de formulário
///
/// - `null` e strings vazias são omitidos
/// - objetos com `gid`/`id` viram o próprio id
/// - arrays de escalares viram lista separada por vírgula
/// - demais objetos seguem como JSON
pub fn to_form_values<T: Serialize>(record: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(record)?;
    let Value::Object(fields) = value else {
        return Err(AsanaError::validation_error("expecting a struct-like request"));
    };

    let mut values = Vec::with_capacity(fields.len());
    for (key, field) in fields {
        if let Some(flat) = flatten(&field) {
            values.push((key, flat));
        }
    }
    Ok(values)
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().filter_map(flatten).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join(","))
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                return None;
            }
            map.get("gid")
                .or_else(|| map.get("id"))
                .and_then(flatten)
                .or_else(|| Some(value.to_string()))
        }
    }
}

/// Remove chaves que a API não aceita
pub fn strip_fields(values: &mut Vec<(String, String)>, fields: &[&str]) {
    values.retain(|(key, _)| !fields.contains(&key.as_str()));
}

/// Codifica pares em `application/x-www-form-urlencoded`
pub fn encode_form(values: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Anexa uma query string a um path
pub fn with_query(path: &str, values: &[(String, String)]) -> String {
    if values.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, encode_form(values))
}
