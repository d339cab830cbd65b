use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AssistantError;
use crate::workflows::mortgage::{DocumentCategory, DocumentCheck};

/// Request to read and sanity-check one uploaded document image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviewRequest {
    pub category: DocumentCategory,
    pub content_type: String,
    /// `https://` link or `data:` URL carrying the image.
    pub image_url: String,
    #[serde(default)]
    pub applicant_name: Option<String>,
}

impl DocumentReviewRequest {
    /// Only image uploads can be sent to the vision model.
    pub(crate) fn ensure_image(&self) -> Result<(), AssistantError> {
        let parsed: mime::Mime = self
            .content_type
            .trim()
            .parse()
            .map_err(|_| AssistantError::UnsupportedDocument(self.content_type.clone()))?;
        if parsed.type_() == mime::IMAGE {
            Ok(())
        } else {
            Err(AssistantError::UnsupportedDocument(self.content_type.clone()))
        }
    }
}

/// What the model read from a document and whether it looks acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidation {
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub matches_category: bool,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub extracted_fields: BTreeMap<String, Value>,
}

impl DocumentValidation {
    /// A document of the wrong kind is never accepted, whatever the model says.
    pub fn to_check(&self) -> DocumentCheck {
        let mut issues = self.issues.clone();
        if !self.matches_category {
            issues.push(format!(
                "document looks like '{}' rather than the requested category",
                self.document_type
            ));
        }
        DocumentCheck {
            is_valid: self.is_valid && self.matches_category,
            issues,
        }
    }
}
