// Binary attachments for create/update calls
//
// When an image or resume rides along with a record, the body switches from
// JSON to `multipart/form-data`: every scalar field becomes a text part and
// the file becomes a binary part with a guessed MIME type.

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::Error;

/// A file to upload alongside a record.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Form field the backend expects the file under (e.g. `image`, `resume`).
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub data: Bytes,
}

impl Attachment {
    /// Build an attachment from in-memory bytes, guessing the MIME type
    /// from the file name.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, data: Bytes) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            field: field.into(),
            file_name,
            mime,
            data,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(field: impl Into<String>, path: &Path) -> Result<Self, Error> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(field, file_name, Bytes::from(data)))
    }

    fn into_part(self) -> Result<Part, Error> {
        Part::bytes(self.data.to_vec())
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(Error::Transport)
    }
}

/// Flatten a JSON-serializable body into a multipart form and append the file.
///
/// Nulls are dropped, strings are sent verbatim, everything else (numbers,
/// booleans, arrays) is sent as its JSON text.
pub(crate) fn form_with_attachment<B: Serialize>(
    body: &B,
    attachment: &Attachment,
) -> Result<Form, Error> {
    let mut form = Form::new();

    if let serde_json::Value::Object(fields) = serde_json::to_value(body)? {
        for (key, value) in fields {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => form = form.text(key, s),
                other => form = form.text(key, other.to_string()),
            }
        }
    }

    let part = attachment.clone().into_part()?;
    Ok(form.part(attachment.field.clone(), part))
}
