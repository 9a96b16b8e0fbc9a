use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, RawQuery, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::time::Instant;

use crate::data_models::PasswordRequest;
use crate::forms::{ArticleForm, FileSelection, UploadFile, filter_uploads};
use crate::routes::PageRoute;
use crate::search_page::SearchPage;
use crate::search_service::{ClientError, SearchRequest};

use super::AppState;
use super::models::{
    EditFormView, ErrorBody, FileTypeWarning, FilterOptionsView, FormOutcome, RedirectResponse,
};
use super::views::{DetailView, OpenApiItemView, SearchPageView, search_page_view};

pub const LOAD_ERROR_MESSAGE: &str = "데이터를 불러오지 못했습니다.";
pub const SUBMIT_ERROR_MESSAGE: &str = "오류가 발생했습니다. 다시 시도해주세요.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "임시 비밀번호를 입력해주세요.";

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorBody::new(message)))
}

/// Client errors of the catalog API pass through, anything else is a bad gateway.
fn relay_status(e: &ClientError) -> StatusCode {
    match e.status() {
        Some(s) if s.is_client_error() => s,
        _ => StatusCode::BAD_GATEWAY,
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, Json<SearchPageView>) {
    let start = Instant::now();

    let (mut page, ticket) = SearchPage::open(query.as_deref().unwrap_or_default());
    let request = page.request();
    let result = state.client.search(&request).await;
    page.complete(ticket, result);

    // the open API tab has no pager of its own and lists every match
    let open_apis = state.open_apis.search(&SearchRequest {
        page: None,
        size: None,
        ..request
    });
    let status = if page.error().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    let view = search_page_view(&page, &open_apis, start.elapsed().as_millis());
    tracing::info!(
        url = %view.url,
        results = view.results.len(),
        open_apis = view.open_api.items.len(),
        elapsed_ms = view.processing_time_ms,
        "search page served"
    );
    (status, Json(view))
}

pub async fn filters_handler() -> Json<FilterOptionsView> {
    Json(FilterOptionsView::unselected())
}

pub async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DetailView>, ApiError> {
    let detail = state.client.article(id).await.map_err(|e| {
        tracing::error!("loading article {id} failed: {:#}", e);
        api_error(relay_status(&e), LOAD_ERROR_MESSAGE)
    })?;
    Ok(Json(DetailView::from(&detail)))
}

pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EditFormView>, ApiError> {
    let detail = state.client.article(id).await.map_err(|e| {
        tracing::error!("loading article {id} for edit failed: {:#}", e);
        api_error(relay_status(&e), LOAD_ERROR_MESSAGE)
    })?;
    Ok(Json(EditFormView {
        id,
        form: ArticleForm::from_detail(&detail),
        options: FilterOptionsView::unselected(),
    }))
}

pub async fn create_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Json<FormOutcome>) {
    submit_article(state, None, multipart).await
}

pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> (StatusCode, Json<FormOutcome>) {
    submit_article(state, Some(id), multipart).await
}

/// Shared create/edit flow: read, validate, drop non-PDF files, relay.
async fn submit_article(
    state: AppState,
    id: Option<i64>,
    multipart: Multipart,
) -> (StatusCode, Json<FormOutcome>) {
    let (form, files) = match read_article_form(multipart).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!("malformed form submission: {e}");
            return (StatusCode::BAD_REQUEST, Json(failure(SUBMIT_ERROR_MESSAGE, None)));
        }
    };
    let FileSelection { accepted, rejected } = filter_uploads(files);
    let warning = FileTypeWarning::new(rejected);

    if let Err(errors) = form.validate() {
        let outcome = FormOutcome {
            errors: errors.messages(),
            ..failure_without_message(warning)
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(outcome));
    }

    let payload = form.to_payload();
    let result = match id {
        Some(id) => state.client.update_article(id, &payload, &accepted).await,
        None => state.client.create_article(&payload, &accepted).await,
    };

    match result {
        Ok(body) => {
            let redirect = match id {
                Some(id) => PageRoute::Detail(id).path(),
                None => created_id(&body)
                    .map(|id| PageRoute::Detail(id).path())
                    .unwrap_or_else(|| PageRoute::Search.path()),
            };
            tracing::info!(files = accepted.len(), %redirect, "article submitted");
            (
                StatusCode::OK,
                Json(FormOutcome {
                    success: true,
                    redirect: Some(redirect),
                    errors: Default::default(),
                    file_type_warning: warning,
                    message: None,
                    uploaded_files: accepted.len(),
                }),
            )
        }
        Err(e) => {
            tracing::error!("submitting article failed: {:#}", e);
            (relay_status(&e), Json(failure(SUBMIT_ERROR_MESSAGE, warning)))
        }
    }
}

fn failure_without_message(warning: Option<FileTypeWarning>) -> FormOutcome {
    FormOutcome {
        success: false,
        redirect: None,
        errors: Default::default(),
        file_type_warning: warning,
        message: None,
        uploaded_files: 0,
    }
}

fn failure(message: &str, warning: Option<FileTypeWarning>) -> FormOutcome {
    FormOutcome {
        message: Some(message.to_string()),
        ..failure_without_message(warning)
    }
}

/// Id of a freshly created article, from `{data: {id}}` or `{id}`.
fn created_id(body: &serde_json::Value) -> Option<i64> {
    body.pointer("/data/id")
        .or_else(|| body.get("id"))
        .and_then(|v| v.as_i64())
}

async fn read_article_form(
    mut multipart: Multipart,
) -> Result<(ArticleForm, Vec<UploadFile>), axum::extract::multipart::MultipartError> {
    let mut form = ArticleForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            // an empty file input still submits one part without a file name
            Some(filename) if name == "files" && filename.is_empty() => {}
            Some(filename) if name == "files" => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                files.push(UploadFile::new(&filename, content_type.as_deref(), bytes.to_vec()));
            }
            _ => {
                let value = field.text().await?;
                form.set(&name, value);
            }
        }
    }
    Ok((form, files))
}

pub async fn edit_request_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PasswordRequest>,
) -> Result<Json<RedirectResponse>, ApiError> {
    if request.password.trim().is_empty() {
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, PASSWORD_REQUIRED_MESSAGE));
    }
    state.client.request_edit(id, &request).await.map_err(|e| {
        tracing::error!("edit request for article {id} failed: {:#}", e);
        api_error(relay_status(&e), "수정 요청에 실패했습니다.")
    })?;
    Ok(Json(RedirectResponse {
        redirect: PageRoute::Edit(id).path(),
    }))
}

pub async fn delete_request_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PasswordRequest>,
) -> Result<Json<RedirectResponse>, ApiError> {
    if request.password.trim().is_empty() {
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, PASSWORD_REQUIRED_MESSAGE));
    }
    state.client.request_delete(id, &request).await.map_err(|e| {
        tracing::error!("delete request for article {id} failed: {:#}", e);
        api_error(relay_status(&e), "삭제 요청에 실패했습니다.")
    })?;
    tracing::info!("article {id} deleted");
    Ok(Json(RedirectResponse {
        redirect: PageRoute::Search.path(),
    }))
}

pub async fn download_handler(
    State(state): State<AppState>,
    Path(file_id): Path<i64>,
) -> Result<Response, ApiError> {
    let upstream = state.client.download_file(file_id).await.map_err(|e| {
        tracing::error!("downloading file {file_id} failed: {:#}", e);
        api_error(relay_status(&e), "파일을 다운로드하지 못했습니다.")
    })?;

    let mut headers = HeaderMap::new();
    for name in [header::CONTENT_TYPE, header::CONTENT_DISPOSITION, header::CONTENT_LENGTH] {
        if let Some(value) = upstream.headers().get(&name) {
            headers.insert(name, value.clone());
        }
    }
    let body = Body::from_stream(upstream.bytes_stream());
    Ok((StatusCode::OK, headers, body).into_response())
}

pub async fn openapi_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OpenApiItemView>, ApiError> {
    state
        .open_apis
        .find(id)
        .map(|entry| Json((&entry).into()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, LOAD_ERROR_MESSAGE))
}

/// Serves the shell for page routes and sends everything else home.
pub async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") {
        return api_error(StatusCode::NOT_FOUND, "not found").into_response();
    }
    if PageRoute::resolve(path).is_none() {
        return Redirect::to(&PageRoute::Landing.path()).into_response();
    }

    let index = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("could not read {}: {e}", index.display());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
