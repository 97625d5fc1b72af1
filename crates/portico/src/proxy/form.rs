//! Multipart form forwarding.
//!
//! Incoming multipart bodies are buffered field by field and rebuilt into a fresh
//! outbound form. Array-style field names collapse to the flat `name[]` form the
//! backend expects.

use axum::extract::Multipart;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error};

use super::error::ProxyError;

#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File {
        file_name: Option<String>,
        content_type: Option<String>,
        data: Bytes,
    },
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

/// Map an indexed array field (`images[0]`, `images[abc]`) to `images[]`.
/// Plain names and names already ending in `[]` are returned unchanged.
pub fn forwarded_field_name(name: &str) -> String {
    match name.split_once('[') {
        Some((prefix, rest)) if !prefix.is_empty() && rest.ends_with(']') && rest != "]" => {
            format!("{prefix}[]")
        }
        _ => name.to_string(),
    }
}

/// Buffer every field of an incoming multipart body.
pub async fn read_multipart(mut multipart: Multipart) -> Result<Vec<FormField>, ProxyError> {
    let mut fields = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Multipart error parsing field: {:?}", e);
        ProxyError::validation(format!("Invalid form data: {}", e.body_text()))
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            debug!("Skipping unnamed multipart field");
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read multipart field {}: {:?}", name, e);
            ProxyError::validation(format!("Invalid form data: {}", e.body_text()))
        })?;

        let value = match (file_name, String::from_utf8(data.to_vec())) {
            (None, Ok(text)) => FormValue::Text(text),
            (file_name, _) => FormValue::File {
                file_name,
                content_type,
                data,
            },
        };
        fields.push(FormField { name, value });
    }

    Ok(fields)
}

/// Rebuild buffered fields into an outbound form.
pub(crate) fn build_form(fields: Vec<FormField>) -> Result<Form, ProxyError> {
    let mut form = Form::new();

    for field in fields {
        let name = forwarded_field_name(&field.name);
        form = match field.value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File {
                file_name,
                content_type,
                data,
            } => {
                let mut part = Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    part = part.file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    part = part.mime_str(&content_type).map_err(|e| {
                        ProxyError::validation(format!(
                            "Invalid content type '{content_type}': {e}"
                        ))
                    })?;
                }
                form.part(name, part)
            }
        };
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_array_fields_are_flattened() {
        assert_eq!(forwarded_field_name("images[0]"), "images[]");
        assert_eq!(forwarded_field_name("images[12]"), "images[]");
        assert_eq!(forwarded_field_name("images[cover]"), "images[]");
    }

    #[test]
    fn test_plain_and_flat_names_unchanged() {
        assert_eq!(forwarded_field_name("title"), "title");
        assert_eq!(forwarded_field_name("images[]"), "images[]");
        assert_eq!(forwarded_field_name("[0]"), "[0]");
        assert_eq!(forwarded_field_name("broken[0"), "broken[0");
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let fields = vec![FormField {
            name: "file".to_string(),
            value: FormValue::File {
                file_name: Some("a.bin".to_string()),
                content_type: Some("not a mime".to_string()),
                data: Bytes::from_static(b"\x00\x01"),
            },
        }];
        assert!(matches!(
            build_form(fields),
            Err(ProxyError::Validation(_))
        ));
    }

    #[test]
    fn test_build_form_accepts_text_and_files() {
        let fields = vec![
            FormField {
                name: "title".to_string(),
                value: FormValue::Text("Launch".to_string()),
            },
            FormField {
                name: "images[0]".to_string(),
                value: FormValue::File {
                    file_name: Some("cover.png".to_string()),
                    content_type: Some("image/png".to_string()),
                    data: Bytes::from_static(b"png"),
                },
            },
        ];
        let form = build_form(fields).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
