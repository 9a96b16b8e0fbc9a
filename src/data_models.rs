use serde::{Deserialize, Serialize};

use crate::labels::FilterDimension;

/// The three filter dimensions. An empty string means "no constraint".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub subject_domain: String,
    #[serde(default)]
    pub source: String,
}

impl SearchFilters {
    pub fn get(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::DocumentType => &self.document_type,
            FilterDimension::SubjectDomain => &self.subject_domain,
            FilterDimension::Source => &self.source,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(&self, dimension: FilterDimension, value: &str) -> SearchFilters {
        let mut next = self.clone();
        let slot = match dimension {
            FilterDimension::DocumentType => &mut next.document_type,
            FilterDimension::SubjectDomain => &mut next.subject_domain,
            FilterDimension::Source => &mut next.source,
        };
        *slot = value.trim().to_string();
        next
    }

    /// Set filters in dimension order.
    pub fn active(&self) -> Vec<(FilterDimension, &str)> {
        FilterDimension::ALL
            .iter()
            .map(|d| (*d, self.get(*d)))
            .filter(|(_, v)| !v.is_empty())
            .collect()
    }
}

/// Summary of one catalog record as returned by the listing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author_organization: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub subject_domain: String,
    #[serde(default)]
    pub source: String,
}

/// Spring-style page object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_elements: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

impl<T> PageData<T> {
    /// Slice an in-memory list into a page. `page` is zero-based.
    pub fn from_items(items: Vec<T>, page: u32, size: u32) -> PageData<T> {
        let size = size.max(1);
        let total_elements = items.len() as u64;
        let total_pages = items.len().div_ceil(size as usize) as u32;
        let start = (page as usize).saturating_mul(size as usize);
        let content: Vec<T> = items.into_iter().skip(start).take(size as usize).collect();
        let count = content.len() as u32;
        PageData {
            content,
            total_pages,
            total_elements,
            size,
            number: page,
            first: page == 0,
            last: page + 1 >= total_pages,
            number_of_elements: Some(count),
            empty: Some(count == 0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    pub data: PageData<SearchResult>,
}

/// `{ data: T }` wrapper used by the single-record endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RefItem {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: i64,
    pub original_filename: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub extension: Option<RefItem>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Full projection of one catalog record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailData {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_organization: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub classification: Option<RefItem>,
    #[serde(default)]
    pub service_type: Option<RefItem>,
    #[serde(default)]
    pub files: Vec<FileItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpenApiStatus {
    Active,
    Inactive,
}

impl OpenApiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenApiStatus::Active => "active",
            OpenApiStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpenApiStatus::Active => "활성",
            OpenApiStatus::Inactive => "비활성",
        }
    }
}

/// Listing of an external open API. Not persisted anywhere.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiResult {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub api_url: String,
    pub provider: String,
    pub category: String,
    pub document_type: String,
    pub subject_domain: String,
    pub source: String,
    pub updated_at: String,
    pub status: OpenApiStatus,
    pub response_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
}

/// Body of the edit-request and delete-request calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PasswordRequest {
    pub password: String,
    #[serde(default)]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items_pages_in_memory_list() {
        let page = PageData::from_items((1..=7).collect::<Vec<i32>>(), 1, 3);
        assert_eq!(page.content, vec![4, 5, 6]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 7);
        assert!(!page.first);
        assert!(!page.last);

        let tail = PageData::from_items((1..=7).collect::<Vec<i32>>(), 2, 3);
        assert_eq!(tail.content, vec![7]);
        assert!(tail.last);
    }

    #[test]
    fn test_filters_with_and_active() {
        let filters = SearchFilters::default()
            .with(FilterDimension::Source, "domestic")
            .with(FilterDimension::DocumentType, "REPORT");
        assert_eq!(
            filters.active(),
            vec![
                (FilterDimension::DocumentType, "REPORT"),
                (FilterDimension::Source, "domestic")
            ]
        );
        let cleared = filters.with(FilterDimension::Source, "");
        assert!(cleared.get(FilterDimension::Source).is_empty());
        assert!(SearchFilters::default().active().is_empty());
    }

    #[test]
    fn test_search_response_parses_spring_page() {
        let json = r#"{
            "status": 200,
            "message": "OK",
            "data": {
                "content": [{"id": 18, "title": "가이드", "authorOrganization": "행정안전부",
                             "updatedAt": "2025-07-07T10:48:39", "views": 3, "extensions": ["pdf"],
                             "documentType": "REPORT", "subjectDomain": "OTHERS", "source": "domestic"}],
                "totalPages": 1, "totalElements": 1, "size": 10, "number": 0,
                "first": true, "last": true, "pageable": {"pageNumber": 0}
            }
        }"#;
        let res: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.data.content[0].author_organization, "행정안전부");
        assert_eq!(res.data.number, 0);
    }
}
