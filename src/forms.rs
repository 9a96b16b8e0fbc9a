//! Create/edit form handling: validation, PDF-only upload filtering and the
//! JSON metadata part sent to the catalog API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data_models::DetailData;
use crate::labels::{CatalogCode, DocumentType, FilterDimension, SubjectDomain};

pub const PDF_MIME: &str = "application/pdf";

pub const MIN_TITLE_LEN: usize = 2;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_PASSWORD_LEN: usize = 4;

pub const UNSUPPORTED_FILE_TITLE: &str = "지원하지 않는 파일 형식";
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "PDF 파일만 업로드 가능합니다. 다른 형식의 파일은 자동으로 제외되었습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    DocumentType,
    SubjectDomain,
    Source,
    Provider,
    Manager,
    Description,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort(usize),
    NotAllowed,
}

impl FieldError {
    pub fn message(&self, field: FormField) -> String {
        match (self, field) {
            (FieldError::Required, FormField::Title) => "파일데이터명을 입력해주세요.".into(),
            (FieldError::Required, FormField::DocumentType) => "문서 유형을 선택해주세요.".into(),
            (FieldError::Required, FormField::SubjectDomain) => "주제 영역을 선택해주세요.".into(),
            (FieldError::Required, FormField::Source) => "출처를 선택해주세요.".into(),
            (FieldError::Required, FormField::Provider) => "제공기관을 입력해주세요.".into(),
            (FieldError::Required, FormField::Manager) => "관리부서를 입력해주세요.".into(),
            (FieldError::Required, FormField::Description) => "설명을 입력해주세요.".into(),
            (FieldError::Required, FormField::Password) => "임시 비밀번호를 입력해주세요.".into(),
            (FieldError::TooShort(min), FormField::Title) => {
                format!("파일데이터명은 {min}자 이상 입력해주세요.")
            }
            (FieldError::TooShort(min), FormField::Description) => {
                format!("설명은 {min}자 이상 입력해주세요.")
            }
            (FieldError::TooShort(min), FormField::Password) => {
                format!("비밀번호는 {min}자 이상 입력해주세요.")
            }
            (FieldError::TooShort(min), _) => format!("{min}자 이상 입력해주세요."),
            (FieldError::NotAllowed, _) => "목록에 있는 값을 선택해주세요.".into(),
        }
    }
}

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub BTreeMap<FormField, FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn messages(&self) -> BTreeMap<FormField, String> {
        self.0
            .iter()
            .map(|(field, err)| (*field, err.message(*field)))
            .collect()
    }
}

/// Values of the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub subject_domain: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub password: String,
}

/// Metadata part (`request`) of the multipart create/edit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    pub title: String,
    pub document_type: String,
    pub subject_domain: String,
    pub source: String,
    pub description: String,
    pub author: String,
    pub author_organization: String,
    pub department: String,
    pub temp_password: String,
    pub document_type_id: Option<u32>,
    pub subject_domain_id: Option<u32>,
}

impl ArticleForm {
    /// Edit form pre-fill. The password is never pre-filled.
    pub fn from_detail(detail: &DetailData) -> ArticleForm {
        ArticleForm {
            title: detail.title.clone(),
            document_type: detail
                .service_type
                .as_ref()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
            subject_domain: detail
                .classification
                .as_ref()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
            source: String::new(),
            provider: detail.author_organization.clone(),
            manager: detail.department.clone(),
            description: detail.description.clone(),
            password: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = BTreeMap::new();

        check_text(&mut errors, FormField::Title, &self.title, MIN_TITLE_LEN);
        check_code(
            &mut errors,
            FormField::DocumentType,
            FilterDimension::DocumentType,
            &self.document_type,
        );
        check_code(
            &mut errors,
            FormField::SubjectDomain,
            FilterDimension::SubjectDomain,
            &self.subject_domain,
        );
        check_code(&mut errors, FormField::Source, FilterDimension::Source, &self.source);
        check_text(&mut errors, FormField::Provider, &self.provider, 0);
        check_text(&mut errors, FormField::Manager, &self.manager, 0);
        check_text(&mut errors, FormField::Description, &self.description, MIN_DESCRIPTION_LEN);
        check_text(&mut errors, FormField::Password, &self.password, MIN_PASSWORD_LEN);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn to_payload(&self) -> ArticlePayload {
        ArticlePayload {
            title: self.title.trim().to_string(),
            document_type: self.document_type.clone(),
            subject_domain: self.subject_domain.clone(),
            source: self.source.clone(),
            description: self.description.trim().to_string(),
            author: self.provider.trim().to_string(),
            author_organization: self.provider.trim().to_string(),
            department: self.manager.trim().to_string(),
            temp_password: self.password.trim().to_string(),
            document_type_id: DocumentType::from_code(&self.document_type).map(|c| c.id()),
            subject_domain_id: SubjectDomain::from_code(&self.subject_domain).map(|c| c.id()),
        }
    }

    /// Set a field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "documentType" => self.document_type = value,
            "subjectDomain" => self.subject_domain = value,
            "source" => self.source = value,
            "provider" => self.provider = value,
            "manager" => self.manager = value,
            "description" => self.description = value,
            "password" => self.password = value,
            _ => {}
        }
    }
}

fn check_text(
    errors: &mut BTreeMap<FormField, FieldError>,
    field: FormField,
    value: &str,
    min_len: usize,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, FieldError::Required);
    } else if value.chars().count() < min_len {
        errors.insert(field, FieldError::TooShort(min_len));
    }
}

fn check_code(
    errors: &mut BTreeMap<FormField, FieldError>,
    field: FormField,
    dimension: FilterDimension,
    value: &str,
) {
    if value.is_empty() {
        errors.insert(field, FieldError::Required);
    } else if !dimension.is_known(value) {
        errors.insert(field, FieldError::NotAllowed);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Falls back to guessing from the file name when the browser sent no
    /// content type.
    pub fn new(filename: &str, content_type: Option<&str>, bytes: Vec<u8>) -> UploadFile {
        let content_type = match content_type.map(str::trim) {
            Some(ct) if !ct.is_empty() => ct.to_string(),
            _ => mime_guess::from_path(filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        UploadFile {
            filename: filename.to_string(),
            content_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type
            .split(';')
            .next()
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME))
    }
}

/// Result of filtering a batch of selected or dropped files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    pub accepted: Vec<UploadFile>,
    /// File names that were dropped.
    pub rejected: Vec<String>,
}

impl FileSelection {
    /// Whether the dismissible "unsupported file type" banner is shown.
    pub fn show_unsupported_warning(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Keep PDF files only. Other files are dropped without failing the upload.
pub fn filter_uploads(files: Vec<UploadFile>) -> FileSelection {
    let mut selection = FileSelection::default();
    for file in files {
        if file.is_pdf() {
            selection.accepted.push(file);
        } else {
            log::warn!("dropping unsupported upload {} ({})", file.filename, file.content_type);
            selection.rejected.push(file.filename);
        }
    }
    selection
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ArticleForm {
        ArticleForm {
            title: "가뭄 대응 보고서".into(),
            document_type: "REPORT".into(),
            subject_domain: "DISASTER_CLIMATE_RISK".into(),
            source: "domestic".into(),
            provider: "한국농어촌공사".into(),
            manager: "수자원관리부".into(),
            description: "전국 저수지 가뭄 대응 현황을 정리한 자료".into(),
            password: "1234".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_empty_title_is_required() {
        let form = ArticleForm {
            title: "   ".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Title), Some(FieldError::Required));
        assert_eq!(errors.messages()[&FormField::Title], "파일데이터명을 입력해주세요.");
    }

    #[test]
    fn test_one_character_title_is_too_short() {
        let form = ArticleForm {
            title: "가".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Title), Some(FieldError::TooShort(MIN_TITLE_LEN)));
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn test_enumerated_fields_must_be_members() {
        let form = ArticleForm {
            document_type: "ZZZ".into(),
            source: "".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::DocumentType), Some(FieldError::NotAllowed));
        assert_eq!(errors.get(FormField::Source), Some(FieldError::Required));
    }

    #[test]
    fn test_short_description_and_password() {
        let form = ArticleForm {
            description: "짧다".into(),
            password: "12".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Description), Some(FieldError::TooShort(10)));
        assert_eq!(errors.messages()[&FormField::Password], "비밀번호는 4자 이상 입력해주세요.");
    }

    #[test]
    fn test_payload_maps_provider_and_ids() {
        let payload = valid_form().to_payload();
        assert_eq!(payload.author, "한국농어촌공사");
        assert_eq!(payload.author_organization, "한국농어촌공사");
        assert_eq!(payload.department, "수자원관리부");
        assert_eq!(payload.temp_password, "1234");
        assert_eq!(payload.document_type_id, Some(3));
        assert_eq!(payload.subject_domain_id, Some(3));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tempPassword"], "1234");
        assert_eq!(json["documentTypeId"], 3);
    }

    #[test]
    fn test_txt_and_pdf_keeps_only_pdf() {
        let selection = filter_uploads(vec![
            UploadFile::new("notes.txt", Some("text/plain"), b"hello".to_vec()),
            UploadFile::new("report.pdf", Some("application/pdf"), b"%PDF-1.7".to_vec()),
        ]);
        assert_eq!(selection.accepted.len(), 1);
        assert_eq!(selection.accepted[0].filename, "report.pdf");
        assert_eq!(selection.rejected, vec!["notes.txt".to_string()]);
        assert!(selection.show_unsupported_warning());
    }

    #[test]
    fn test_missing_content_type_is_guessed() {
        let file = UploadFile::new("scan.pdf", None, Vec::new());
        assert!(file.is_pdf());
        let file = UploadFile::new("sheet.xlsx", Some(""), Vec::new());
        assert!(!file.is_pdf());
        let selection = filter_uploads(vec![UploadFile::new("a.pdf", None, vec![])]);
        assert!(!selection.show_unsupported_warning());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
