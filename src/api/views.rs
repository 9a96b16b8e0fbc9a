//! View-models for the search, detail and open API pages.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::data_models::{DetailData, FileItem, OpenApiResult, PageData, SearchResult};
use crate::forms::format_file_size;
use crate::labels::FilterDimension;
use crate::openapi_catalog::category_label;
use crate::pagination::Pagination;
use crate::search_page::SearchPage;
use crate::url_state::{PAGE_SIZES, SearchAction, SearchState, next_url};

use super::models::FilterSelectView;

/// `2025-07-07T10:48:39` → `2025-07-07`. Unparseable input is returned as-is.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    pub dimension: &'static str,
    pub dimension_label: &'static str,
    pub code: String,
    pub label: String,
}

impl TagView {
    pub fn new(dimension: FilterDimension, code: &str) -> Self {
        Self {
            dimension: dimension.key(),
            dimension_label: dimension.label(),
            code: code.to_string(),
            label: dimension.display_label(code),
        }
    }
}

/// Active filter with the URL that clears it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTagView {
    #[serde(flatten)]
    pub tag: TagView,
    pub remove_url: String,
}

pub fn filter_tags(state: &SearchState) -> Vec<FilterTagView> {
    state
        .filters
        .active()
        .into_iter()
        .map(|(dimension, value)| FilterTagView {
            tag: TagView::new(dimension, value),
            remove_url: next_url(&SearchAction::FilterChange(dimension, String::new()), state),
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItemView {
    pub id: i64,
    pub title: String,
    /// Title split at the first `_`, the remainder is shown dimmed.
    pub title_main: String,
    pub title_suffix: Option<String>,
    pub organization: String,
    pub updated: String,
    pub views: u64,
    pub extensions: Vec<String>,
    pub tags: Vec<TagView>,
    pub detail_url: String,
}

impl From<&SearchResult> for ResultItemView {
    fn from(result: &SearchResult) -> Self {
        let (title_main, title_suffix) = match result.title.split_once('_') {
            Some((main, rest)) => (main.to_string(), Some(rest.to_string())),
            None => (result.title.clone(), None),
        };
        let tags = [
            (FilterDimension::DocumentType, &result.document_type),
            (FilterDimension::SubjectDomain, &result.subject_domain),
            (FilterDimension::Source, &result.source),
        ]
        .into_iter()
        .filter(|(_, code)| !code.is_empty())
        .map(|(dimension, code)| TagView::new(dimension, code))
        .collect();

        Self {
            id: result.id,
            title: result.title.clone(),
            title_main,
            title_suffix,
            organization: result.author_organization.clone(),
            updated: format_date(&result.updated_at),
            views: result.views,
            extensions: result.extensions.iter().map(|e| e.to_uppercase()).collect(),
            tags,
            detail_url: format!("/detail/{}", result.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiItemView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub provider: String,
    pub api_url: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub category: String,
    pub category_label: String,
    pub tags: Vec<TagView>,
    pub response_format: String,
    pub rate_limit: Option<String>,
    pub authentication: Option<String>,
    pub updated: String,
    pub detail_url: String,
}

impl From<&OpenApiResult> for OpenApiItemView {
    fn from(entry: &OpenApiResult) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            description: entry.description.clone(),
            provider: entry.provider.clone(),
            api_url: entry.api_url.clone(),
            status: entry.status.as_str(),
            status_label: entry.status.label(),
            category: entry.category.clone(),
            category_label: category_label(&entry.category),
            tags: vec![
                TagView::new(FilterDimension::DocumentType, &entry.document_type),
                TagView::new(FilterDimension::SubjectDomain, &entry.subject_domain),
                TagView::new(FilterDimension::Source, &entry.source),
            ],
            response_format: entry.response_format.clone(),
            rate_limit: entry.rate_limit.clone(),
            authentication: entry.authentication.clone(),
            updated: format_date(&entry.updated_at),
            detail_url: format!("/openapi-detail/{}", entry.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub page: u32,
    pub current: bool,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub pages: Vec<PageLink>,
    /// `None` when the control is disabled.
    pub first_url: Option<String>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub last_url: Option<String>,
}

impl PaginationView {
    pub fn new(pagination: &Pagination, state: &SearchState) -> Self {
        let url = |page: u32| next_url(&SearchAction::PageChange(page), state);
        let enabled = |disabled: bool, page: u32| (!disabled).then(|| url(page));
        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            pages: pagination
                .pages
                .iter()
                .map(|b| PageLink {
                    page: b.page,
                    current: b.current,
                    url: url(b.page),
                })
                .collect(),
            first_url: enabled(pagination.first_disabled, 1),
            prev_url: enabled(pagination.prev_disabled, pagination.prev_page()),
            next_url: enabled(pagination.next_disabled, pagination.next_page()),
            last_url: enabled(pagination.last_disabled, pagination.total_pages),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSizeLink {
    pub size: u32,
    pub selected: bool,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub query: String,
    pub document_type: String,
    pub subject_domain: String,
    pub source: String,
    pub page: u32,
    pub size: u32,
}

impl From<&SearchState> for StateView {
    fn from(state: &SearchState) -> Self {
        Self {
            query: state.query.clone(),
            document_type: state.filters.document_type.clone(),
            subject_domain: state.filters.subject_domain.clone(),
            source: state.filters.source.clone(),
            page: state.page,
            size: state.size,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiTabView {
    pub total_elements: u64,
    pub items: Vec<OpenApiItemView>,
}

/// Everything the search results page renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageView {
    pub state: StateView,
    pub url: String,
    pub total_elements: u64,
    pub file_total_elements: u64,
    pub results: Vec<ResultItemView>,
    pub open_api: OpenApiTabView,
    pub pagination: Option<PaginationView>,
    pub filter_tags: Vec<FilterTagView>,
    pub filters: Vec<FilterSelectView>,
    pub page_sizes: Vec<PageSizeLink>,
    pub reset_url: String,
    pub error: Option<String>,
    pub processing_time_ms: u128,
}

pub fn search_page_view(
    page: &SearchPage,
    open_apis: &PageData<OpenApiResult>,
    processing_time_ms: u128,
) -> SearchPageView {
    let state = page.state();
    let file_total = page.total_elements();
    let open_api_total = open_apis.total_elements;

    SearchPageView {
        state: state.into(),
        url: state.to_url(),
        total_elements: file_total + open_api_total,
        file_total_elements: file_total,
        results: page.results().iter().map(ResultItemView::from).collect(),
        open_api: OpenApiTabView {
            total_elements: open_api_total,
            items: open_apis.content.iter().map(OpenApiItemView::from).collect(),
        },
        pagination: page
            .pagination()
            .map(|p| PaginationView::new(&p, state)),
        filter_tags: filter_tags(state),
        filters: FilterDimension::ALL
            .into_iter()
            .map(|d| FilterSelectView::new(d, state.filters.get(d)))
            .collect(),
        page_sizes: PAGE_SIZES
            .into_iter()
            .map(|size| PageSizeLink {
                size,
                selected: size == state.size,
                url: next_url(&SearchAction::PageSizeChange(size), state),
            })
            .collect(),
        reset_url: next_url(&SearchAction::Reset, state),
        error: page.error().map(str::to_string),
        processing_time_ms,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub size_label: String,
    pub extension: Option<String>,
    pub created: String,
    pub download_url: String,
}

impl From<&FileItem> for FileView {
    fn from(file: &FileItem) -> Self {
        Self {
            id: file.id,
            name: file.original_filename.clone(),
            size: file.file_size,
            size_label: format_file_size(file.file_size),
            extension: file.extension.as_ref().map(|e| e.name.clone()),
            created: format_date(&file.created_at),
            download_url: format!("/api/files/{}/download", file.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub organization: String,
    pub department: String,
    pub created: String,
    pub updated: String,
    pub views: u64,
    pub classification: Option<String>,
    pub service_type: Option<String>,
    pub files: Vec<FileView>,
    pub edit_request_url: String,
    pub delete_request_url: String,
}

impl From<&DetailData> for DetailView {
    fn from(data: &DetailData) -> Self {
        Self {
            id: data.id,
            title: data.title.clone(),
            description: data.description.clone(),
            author: data.author.clone(),
            organization: data.author_organization.clone(),
            department: data.department.clone(),
            created: format_date(&data.created_at),
            updated: format_date(&data.updated_at),
            views: data.views,
            classification: data.classification.as_ref().map(|c| c.name.clone()),
            service_type: data.service_type.as_ref().map(|s| s.name.clone()),
            files: data.files.iter().map(FileView::from).collect(),
            edit_request_url: format!("/api/articles/{}/edit-request", data.id),
            delete_request_url: format!("/api/articles/{}/delete-request", data.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-07-07T10:48:39"), "2025-07-07");
        assert_eq!(format_date("2025-07-07T10:48:39.123"), "2025-07-07");
        assert_eq!(format_date("2025-07-07T10:48:39+09:00"), "2025-07-07");
        assert_eq!(format_date("2025-07-07"), "2025-07-07");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_result_item_unknown_code_renders_raw() {
        let result = SearchResult {
            id: 7,
            title: "한국농어촌공사_가뭄지도 정보".into(),
            author_organization: "한국농어촌공사".into(),
            updated_at: "2025-03-13T00:00:00".into(),
            views: 6260,
            extensions: vec!["pdf".into()],
            document_type: "ZZZ".into(),
            subject_domain: "".into(),
            source: "domestic".into(),
        };
        let view = ResultItemView::from(&result);
        assert_eq!(view.title_main, "한국농어촌공사");
        assert_eq!(view.title_suffix.as_deref(), Some("가뭄지도 정보"));
        assert_eq!(view.tags.len(), 2);
        assert_eq!(view.tags[0].label, "ZZZ");
        assert_eq!(view.tags[1].label, "국내");
        assert_eq!(view.extensions, vec!["PDF".to_string()]);
        assert_eq!(view.detail_url, "/detail/7");
    }

    #[test]
    fn test_filter_tags_carry_remove_urls() {
        let state = SearchState::from_query("query=q&documentType=REPORT&source=foreign&page=3");
        let tags = filter_tags(&state);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].tag.label, "보고서");
        assert_eq!(tags[0].remove_url, "/search?query=q&source=foreign&page=1&size=10");
        assert_eq!(tags[1].tag.dimension_label, "출처");
    }

    #[test]
    fn test_pagination_view_disables_edges() {
        let state = SearchState::from_query("page=1");
        let pagination = Pagination::new(1, 10).unwrap();
        let view = PaginationView::new(&pagination, &state);
        assert!(view.first_url.is_none());
        assert!(view.prev_url.is_none());
        assert_eq!(view.next_url.as_deref(), Some("/search?page=2&size=10"));
        assert_eq!(view.last_url.as_deref(), Some("/search?page=10&size=10"));
        assert_eq!(view.pages.len(), 5);
    }
}
