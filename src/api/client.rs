use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::models::*;

/// Client for the json-server style backend that owns campsites and comments.
#[derive(Clone)]
pub struct CampsiteClient {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct CommentPost<'a> {
    #[serde(flatten)]
    comment: &'a NewComment,
    date: String,
}

impl CampsiteClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(concat!("campsite-info/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn campsite_url(&self, id: u32) -> Result<Url, ApiError> {
        self.join(&format!("campsites/{id}"))
    }

    pub fn comments_url(&self, campsite_id: u32) -> Result<Url, ApiError> {
        let mut url = self.join("comments")?;
        url.query_pairs_mut()
            .append_pair("campsiteId", &campsite_id.to_string());
        Ok(url)
    }

    /// Absolute URL of a campsite image reference. Absolute references pass through.
    pub fn image_url(&self, image: &str) -> Result<Url, ApiError> {
        self.join(image)
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let resp = self.client.get(url).send().await?;
        let resp = check_status(resp)?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_campsite(&self, id: u32) -> Result<Campsite, ApiError> {
        let url = self.campsite_url(id)?;
        let resp = self.client.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::CampsiteNotFound(id));
        }
        let campsite: Campsite = check_status(resp)?.json().await?;
        debug!(id = id, name = %campsite.name, "Fetched campsite");
        Ok(campsite)
    }

    pub async fn fetch_comments(&self, campsite_id: u32) -> Result<Vec<Comment>, ApiError> {
        let url = self.comments_url(campsite_id)?;
        let comments: Vec<Comment> = self.get_json(url).await?;
        let comments = retain_for_campsite(comments, campsite_id);
        debug!(
            campsite_id = campsite_id,
            count = comments.len(),
            "Fetched comments"
        );
        Ok(comments)
    }

    /// Posts a new comment stamped with the current time and returns the stored record.
    pub async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let url = self.join("comments")?;
        let body = CommentPost {
            comment,
            date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };

        let resp = self.client.post(url).json(&body).send().await?;
        let created: Comment = check_status(resp)?.json().await?;
        debug!(id = created.id, campsite_id = created.campsite_id, "Posted comment");
        Ok(created)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    // Url::join replaces the last segment unless the path ends in '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

/// Drops comments that belong to other campsites, keeping server order.
pub fn retain_for_campsite(comments: Vec<Comment>, campsite_id: u32) -> Vec<Comment> {
    comments
        .into_iter()
        .filter(|c| c.campsite_id == campsite_id)
        .collect()
}
