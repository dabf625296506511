//! Async HTTP client wrapping the arv dashboard JSON API.

use std::time::Duration;

use arv_core::{
  activity::Activity,
  api::DashboardApi,
  event::{NewEvent, RawEvent},
  heritage::HeritageItem,
  profile::{ProfileUpdate, UserProfile},
};
use reqwest::{Client, Response};

use crate::{credential::TokenFile, error::ClientError};

/// Connection settings for the dashboard API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:   String,
  /// Location of the bearer token on local disk.
  pub token_file: TokenFile,
}

/// Async HTTP client for the dashboard JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Attach the bearer token, re-read from disk for every request.
  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match self.config.token_file.read() {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Reject non-success responses, surfacing the backend's own `message`
  /// field when the body carries one.
  async fn check(what: &str, resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|body| {
        body
          .get("message")
          .and_then(|m| m.as_str())
          .map(String::from)
      })
      .unwrap_or_else(|| format!("{what} → {status}"));
    Err(ClientError::Server(message))
  }
}

// ─── DashboardApi impl ────────────────────────────────────────────────────────

impl DashboardApi for ApiClient {
  type Error = ClientError;

  // ── Profile ───────────────────────────────────────────────────────────────

  /// `GET /api/dashboard/profile`
  async fn user_profile(&self) -> Result<UserProfile, ClientError> {
    let resp = self
      .auth(self.client.get(self.url("/dashboard/profile")))
      .send()
      .await?;
    Ok(Self::check("GET /dashboard/profile", resp).await?.json().await?)
  }

  /// `PUT /api/dashboard/profile` — partial body, full profile response.
  async fn update_profile(
    &self,
    update: &ProfileUpdate,
  ) -> Result<UserProfile, ClientError> {
    let resp = self
      .auth(self.client.put(self.url("/dashboard/profile")))
      .json(update)
      .send()
      .await?;
    Ok(Self::check("PUT /dashboard/profile", resp).await?.json().await?)
  }

  // ── Events ────────────────────────────────────────────────────────────────

  /// `GET /api/dashboard/events`
  async fn upcoming_events(&self) -> Result<Vec<RawEvent>, ClientError> {
    let resp = self
      .auth(self.client.get(self.url("/dashboard/events")))
      .send()
      .await?;
    Ok(Self::check("GET /dashboard/events", resp).await?.json().await?)
  }

  /// `POST /api/dashboard/events`
  async fn create_event(&self, draft: &NewEvent) -> Result<RawEvent, ClientError> {
    let resp = self
      .auth(self.client.post(self.url("/dashboard/events")))
      .json(draft)
      .send()
      .await?;
    Ok(Self::check("POST /dashboard/events", resp).await?.json().await?)
  }

  /// `PUT /api/dashboard/events/<id>`
  async fn update_event(
    &self,
    id: &str,
    draft: &NewEvent,
  ) -> Result<RawEvent, ClientError> {
    let resp = self
      .auth(
        self
          .client
          .put(self.url(&format!("/dashboard/events/{id}"))),
      )
      .json(draft)
      .send()
      .await?;
    Ok(Self::check("PUT /dashboard/events", resp).await?.json().await?)
  }

  /// `DELETE /api/dashboard/events/<id>`
  async fn delete_event(&self, id: &str) -> Result<(), ClientError> {
    let resp = self
      .auth(
        self
          .client
          .delete(self.url(&format!("/dashboard/events/{id}"))),
      )
      .send()
      .await?;
    Self::check("DELETE /dashboard/events", resp).await?;
    Ok(())
  }

  // ── Activity ──────────────────────────────────────────────────────────────

  /// `GET /api/dashboard/activities`
  async fn recent_activities(&self) -> Result<Vec<Activity>, ClientError> {
    let resp = self
      .auth(self.client.get(self.url("/dashboard/activities")))
      .send()
      .await?;
    Ok(
      Self::check("GET /dashboard/activities", resp)
        .await?
        .json()
        .await?,
    )
  }

  // ── Bookmarks ─────────────────────────────────────────────────────────────

  /// `GET /api/heritage/bookmarked` — requires a stored credential.
  async fn bookmarked_items(&self) -> Result<Vec<HeritageItem>, ClientError> {
    if self.config.token_file.read().is_none() {
      return Err(ClientError::MissingCredential(
        self.config.token_file.path().display().to_string(),
      ));
    }
    let resp = self
      .auth(self.client.get(self.url("/heritage/bookmarked")))
      .send()
      .await?;
    Ok(
      Self::check("GET /heritage/bookmarked", resp)
        .await?
        .json()
        .await?,
    )
  }

  /// `DELETE /api/dashboard/bookmarks?item=<id>`
  ///
  /// The key goes in a query parameter: in the rich-row path it is a title
  /// string that may contain characters unfit for a path segment.
  async fn remove_bookmark(&self, item_id: &str) -> Result<(), ClientError> {
    let resp = self
      .auth(self.client.delete(self.url("/dashboard/bookmarks")))
      .query(&[("item", item_id)])
      .send()
      .await?;
    Self::check("DELETE /dashboard/bookmarks", resp).await?;
    Ok(())
  }
}
