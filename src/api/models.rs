use std::collections::BTreeMap;

use serde::Serialize;

use crate::forms::{ArticleForm, FormField, UNSUPPORTED_FILE_MESSAGE, UNSUPPORTED_FILE_TITLE};
use crate::labels::{FilterDimension, SelectOption};
use crate::url_state::PAGE_SIZES;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

/// Dismissible banner shown when non-PDF files were dropped.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileTypeWarning {
    pub title: &'static str,
    pub message: &'static str,
    pub rejected: Vec<String>,
}

impl FileTypeWarning {
    pub fn new(rejected: Vec<String>) -> Option<Self> {
        if rejected.is_empty() {
            return None;
        }
        Some(Self {
            title: UNSUPPORTED_FILE_TITLE,
            message: UNSUPPORTED_FILE_MESSAGE,
            rejected,
        })
    }
}

/// Result of a create or edit submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<FormField, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type_warning: Option<FileTypeWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub uploaded_files: usize,
}

#[derive(Debug, Serialize)]
pub struct FilterSelectView {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub selected: String,
    pub options: Vec<SelectOption>,
}

impl FilterSelectView {
    pub fn new(dimension: FilterDimension, selected: &str) -> Self {
        Self {
            key: dimension.key(),
            label: dimension.label(),
            placeholder: dimension.placeholder(),
            selected: selected.to_string(),
            options: dimension.options(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsView {
    pub filters: Vec<FilterSelectView>,
    pub page_sizes: Vec<u32>,
}

impl FilterOptionsView {
    pub fn unselected() -> Self {
        Self {
            filters: FilterDimension::ALL
                .into_iter()
                .map(|d| FilterSelectView::new(d, ""))
                .collect(),
            page_sizes: PAGE_SIZES.to_vec(),
        }
    }
}

/// Pre-filled edit form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFormView {
    pub id: i64,
    pub form: ArticleForm,
    pub options: FilterOptionsView,
}
