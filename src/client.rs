//! This module provides a client to a remote REST collection of events

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use url::Url;

use crate::error::SyncError;
use crate::event::{Event, EventId};
use crate::traits::RemoteSource;


/// A [`RemoteSource`] that performs HTTP requests against a collection URL
///
/// * `GET {base}` lists the events
/// * `POST {base}` creates an event
/// * `PUT {base}/{id}` replaces an event
/// * `DELETE {base}/{id}` removes an event
///
/// Every non-2xx status is considered as a failure. Failures are logged, and returned to the caller.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|err| SyncError::InvalidUrl(format!("{}: {}", base_url.as_ref(), err)))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the URL set in [`config::API_BASE_URL`](crate::config::API_BASE_URL)
    pub fn from_config() -> Result<Self, SyncError> {
        Self::new(crate::config::api_base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of a single event
    fn event_url(&self, id: &EventId) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Event>) -> Result<Response, SyncError> {
        log::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(event) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(event)?);
        }

        let response = request.send().await?;
        if response.status().is_success() == false {
            return Err(SyncError::Status(response.status()));
        }
        Ok(response)
    }

    async fn send_and_parse<T>(&self, method: Method, url: Url, body: Option<&Event>) -> Result<T, SyncError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(method, url, body).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Logs a failed request before handing its error back
fn logged<T>(result: Result<T, SyncError>, action: &str) -> Result<T, SyncError> {
    if let Err(err) = &result {
        log::error!("Error {}: {}", action, err);
    }
    result
}

#[async_trait]
impl RemoteSource for Client {
    /// Records that are not valid events (e.g. without a title, or with an unsupported id or date) are skipped with a warning
    async fn fetch_all(&self) -> Result<Vec<Event>, SyncError> {
        let result: Result<Vec<serde_json::Value>, SyncError> = self.send_and_parse(Method::GET, self.base_url.clone(), None).await;
        let records = logged(result, "fetching events")?;
        let n_records = records.len();

        let events: Vec<Event> = records.into_iter()
            .filter_map(|record| match serde_json::from_value::<Event>(record.clone()) {
                Ok(event) => Some(event),
                Err(err) => {
                    log::warn!("Skipping invalid remote record {}: {}", record, err);
                    None
                },
            })
            .collect();
        log::info!("Fetched {} events ({} records) from {}", events.len(), n_records, self.base_url);
        Ok(events)
    }

    async fn create(&self, event: &Event) -> Result<Event, SyncError> {
        let result: Result<Event, SyncError> = self.send_and_parse(Method::POST, self.base_url.clone(), Some(event)).await;
        logged(result, "saving event")
    }

    async fn update(&self, id: &EventId, event: &Event) -> Result<Event, SyncError> {
        let result: Result<Event, SyncError> = match self.event_url(id) {
            Err(err) => Err(err),
            Ok(url) => self.send_and_parse(Method::PUT, url, Some(event)).await,
        };
        logged(result, "updating event")
    }

    async fn remove(&self, id: &EventId) -> Result<(), SyncError> {
        let result = match self.event_url(id) {
            Err(err) => Err(err),
            Ok(url) => self.send(Method::DELETE, url, None).await.map(|_| ()),
        };
        logged(result, "deleting event")
    }
}
