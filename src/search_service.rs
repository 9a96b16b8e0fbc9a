use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::Config;
use crate::data_models::{DataEnvelope, DetailData, PasswordRequest, SearchResponse};
use crate::forms::{ArticlePayload, UploadFile};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid catalog api url: {0}")]
    Url(#[from] url::ParseError),
    #[error("catalog api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog api returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Status code returned by the catalog API, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Parameters of the listing endpoint. `page` is zero-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<String>,
    pub document_type: Option<String>,
    pub subject_domain: Option<String>,
    pub source: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SearchRequest {
    /// Query-string pairs for every field that is set and non-empty.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("query", &self.query),
            ("documentType", &self.document_type),
            ("subjectDomain", &self.subject_domain),
            ("source", &self.source),
        ];
        let mut pairs: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}

/// Thin wrapper over the remote catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // fail early on an unusable base url
        Url::parse(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    pub fn search_url(&self, request: &SearchRequest) -> Result<Url, ClientError> {
        let mut url = self.endpoint("articles")?;
        let pairs = request.pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `GET /articles` with the given filters.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let url = self.search_url(request)?;
        log::debug!("searching catalog: {url}");
        let res = self.http.get(url).send().await?;
        Self::read_json(res).await
    }

    /// `GET /articles/{id}`
    pub async fn article(&self, id: i64) -> Result<DetailData, ClientError> {
        let url = self.endpoint(&format!("articles/{id}"))?;
        let res = self.http.get(url).send().await?;
        let envelope: DataEnvelope<DetailData> = Self::read_json(res).await?;
        Ok(envelope.data)
    }

    /// `POST /articles` as multipart.
    pub async fn create_article(
        &self,
        payload: &ArticlePayload,
        files: &[UploadFile],
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint("articles")?;
        let form = Self::article_form(payload, files)?;
        let res = self.http.post(url).multipart(form).send().await?;
        Self::read_body(res).await
    }

    /// `PATCH /articles/{id}` as multipart.
    pub async fn update_article(
        &self,
        id: i64,
        payload: &ArticlePayload,
        files: &[UploadFile],
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&format!("articles/{id}"))?;
        let form = Self::article_form(payload, files)?;
        let res = self.http.patch(url).multipart(form).send().await?;
        Self::read_body(res).await
    }

    /// `POST /articles/{id}` with the temporary password, gating an edit.
    pub async fn request_edit(
        &self,
        id: i64,
        request: &PasswordRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&format!("articles/{id}"))?;
        let res = self.http.post(url).json(request).send().await?;
        Self::read_body(res).await
    }

    /// `DELETE /articles/{id}` with the temporary password.
    pub async fn request_delete(
        &self,
        id: i64,
        request: &PasswordRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&format!("articles/{id}"))?;
        let res = self.http.delete(url).json(request).send().await?;
        Self::read_body(res).await
    }

    /// `GET /multipart-upload/files/{id}/download`. The response body is left
    /// unread so callers can stream it.
    pub async fn download_file(&self, file_id: i64) -> Result<Response, ClientError> {
        let url = self.endpoint(&format!("multipart-upload/files/{file_id}/download"))?;
        let res = self.http.get(url).send().await?;
        Self::check(res).await
    }

    fn article_form(payload: &ArticlePayload, files: &[UploadFile]) -> Result<Form, ClientError> {
        let json = serde_json::to_vec(payload)?;
        let mut form = Form::new().part(
            "request",
            Part::bytes(json)
                .file_name("request.json")
                .mime_str("application/json")?,
        );
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)?;
            form = form.part("files", part);
        }
        Ok(form)
    }

    async fn check(res: Response) -> Result<Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
        let res = Self::check(res).await?;
        Ok(res.json::<T>().await?)
    }

    /// Mutation endpoints may answer with JSON, plain text or nothing.
    async fn read_body(res: Response) -> Result<serde_json::Value, ClientError> {
        let res = Self::check(res).await?;
        let text = res.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:8080/api/v1/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_search_url_omits_empty_fields() {
        let request = SearchRequest {
            query: Some("가뭄 지도".into()),
            document_type: Some("".into()),
            source: Some("domestic".into()),
            page: Some(0),
            size: Some(10),
            ..Default::default()
        };
        let url = client().search_url(&request).unwrap();
        assert_eq!(url.path(), "/api/v1/articles");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "가뭄 지도".to_string()),
                ("source".to_string(), "domestic".to_string()),
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_url_without_parameters_has_no_query() {
        let url = client().search_url(&SearchRequest::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/articles");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(CatalogClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
