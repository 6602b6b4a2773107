//! Async HTTP client wrapping the schema registry's JSON API.

use std::time::Duration;

use reqwest::{Client, Method, Response, Url, header::CONTENT_TYPE};
use schemadoc_core::{
  backend::SchemaBackend,
  note::{NewNote, Note, NoteUpdate},
  schema::{SchemaElement, SchemaRecord},
  source::{CategoryBody, Source},
  topic::Topic,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{Error, Result};

/// Connection settings for the registry API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8888".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the registry REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  base:   Url,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .map_err(|e| Error::BaseUrl(format!("{}: {e}", config.base_url)))?;
    if base.cannot_be_a_base() {
      return Err(Error::BaseUrl(config.base_url));
    }
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Build)?;
    Ok(Self { client, base })
  }

  /// `<base>/v1/<segments...>`, with every segment percent-encoded.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|()| Error::BaseUrl(self.base.to_string()))?
      .pop_if_empty()
      .push("v1")
      .extend(segments);
    Ok(url)
  }

  async fn send<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<Response>
  where
    B: Serialize + Sync + ?Sized,
  {
    let url = self.url(segments)?;
    let path = url.path().to_owned();
    debug!(%method, %path, "registry request");

    let mut req = self
      .client
      .request(method.clone(), url)
      .header(CONTENT_TYPE, "application/json");
    if let Some(body) = body {
      req = req.json(body);
    }

    let resp = req.send().await.map_err(|source| Error::Request {
      method: method.clone(),
      path: path.clone(),
      source,
    })?;

    let status = resp.status();
    if !status.is_success() {
      debug!(%method, %path, %status, "registry request rejected");
      return Err(Error::Status { method, path, status });
    }
    Ok(resp)
  }

  async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
    let resp = self.send::<()>(Method::GET, segments, None).await?;
    decode(resp).await
  }

  async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned,
  {
    let resp = self.send(Method::POST, segments, Some(body)).await?;
    decode(resp).await
  }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let path = resp.url().path().to_owned();
  resp.json().await.map_err(|source| Error::Decode { path, source })
}

// ─── SchemaBackend impl ───────────────────────────────────────────────────────

impl SchemaBackend for ApiClient {
  type Error = Error;

  // ── Namespaces and sources ────────────────────────────────────────────

  async fn list_namespaces(&self) -> Result<Vec<String>> {
    self.get(&["namespaces"]).await
  }

  async fn list_namespace_sources(&self, namespace: &str) -> Result<Vec<Source>> {
    self.get(&["namespaces", namespace, "sources"]).await
  }

  async fn list_sources(&self) -> Result<Vec<Source>> {
    self.get(&["sources"]).await
  }

  async fn get_source(&self, source_id: i64) -> Result<Source> {
    self.get(&["sources", source_id.to_string().as_str()]).await
  }

  // ── Topics ────────────────────────────────────────────────────────────

  async fn list_source_topics(&self, source_id: i64) -> Result<Vec<Topic>> {
    self.get(&["sources", source_id.to_string().as_str(), "topics"]).await
  }

  async fn latest_topic(&self, source_id: i64) -> Result<Topic> {
    self
      .get(&["sources", source_id.to_string().as_str(), "topics", "latest"])
      .await
  }

  // ── Schemas ───────────────────────────────────────────────────────────

  async fn get_schema(&self, schema_id: i64) -> Result<SchemaRecord> {
    self.get(&["schemas", schema_id.to_string().as_str()]).await
  }

  async fn list_topic_schemas(&self, topic_name: &str) -> Result<Vec<SchemaRecord>> {
    self.get(&["topics", topic_name, "schemas"]).await
  }

  async fn latest_schema(&self, topic_name: &str) -> Result<SchemaRecord> {
    self.get(&["topics", topic_name, "schemas", "latest"]).await
  }

  async fn schema_elements(&self, schema_id: i64) -> Result<Vec<SchemaElement>> {
    self
      .get(&["schemas", schema_id.to_string().as_str(), "elements"])
      .await
  }

  // ── Notes ─────────────────────────────────────────────────────────────

  async fn create_note(&self, note: NewNote) -> Result<Note> {
    self.post(&["notes"], &note).await
  }

  async fn update_note(&self, note_id: i64, update: NoteUpdate) -> Result<Note> {
    self.post(&["notes", note_id.to_string().as_str()], &update).await
  }

  // ── Categories ────────────────────────────────────────────────────────

  async fn list_categories(&self) -> Result<Vec<String>> {
    self.get(&["categories"]).await
  }

  async fn set_category(&self, source_id: i64, category: &str) -> Result<()> {
    let body = CategoryBody { category: category.to_owned() };
    self
      .send(Method::POST, &["sources", source_id.to_string().as_str(), "category"], Some(&body))
      .await?;
    Ok(())
  }

  async fn clear_category(&self, source_id: i64) -> Result<()> {
    self
      .send::<()>(Method::DELETE, &["sources", source_id.to_string().as_str(), "category"], None)
      .await?;
    Ok(())
  }
}
