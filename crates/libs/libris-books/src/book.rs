//! The book record served to clients.

use crate::google::Volume;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Pdf,
    Epub,
    Unknown,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Epub => "EPUB",
            FileType::Unknown => "UNKNOWN",
        }
    }

    fn extension(&self) -> Option<&'static str> {
        match self {
            FileType::Pdf => Some(".pdf"),
            FileType::Epub => Some(".epub"),
            FileType::Unknown => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about one volume of the user's library.
///
/// Empty fields are left out of the JSON rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identifier_type: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub average_rating: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    pub file_type: FileType,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl From<&Volume> for Book {
    fn from(volume: &Volume) -> Self {
        let info = &volume.volume_info;

        let (identifier, identifier_type) = info
            .industry_identifiers
            .iter()
            .find(|id| !id.identifier.is_empty())
            .map(|id| (id.identifier.clone(), id.kind.clone()))
            .unwrap_or_default();

        let file_type = if volume.access_info.pdf.is_some() {
            FileType::Pdf
        } else if volume.access_info.epub.is_some() {
            FileType::Epub
        } else {
            FileType::Unknown
        };

        Book {
            title: strip_extension(&info.title, file_type),
            authors: info.authors.clone(),
            identifier,
            identifier_type,
            average_rating: info.average_rating.unwrap_or_default(),
            publisher: info.publisher.clone(),
            file_type,
        }
    }
}

/// Uploaded files often keep their file name as the title.
fn strip_extension(title: &str, file_type: FileType) -> String {
    let Some(extension) = file_type.extension() else {
        return title.to_string();
    };

    let cut = title.len().saturating_sub(extension.len());
    match title.get(cut..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(extension) => title[..cut].to_string(),
        _ => title.to_string(),
    }
}
