//! Traits used to abstract the data sources of a [`Planner`](crate::Planner)

use async_trait::async_trait;

use crate::error::{StoreError, SyncError};
use crate::event::{Event, EventId};

/// A durable key-value storage, such as a browser's local storage or a folder on disk
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` in case nothing was stored yet
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Stores `value` under `key`, overwriting any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// A remote collection of events, that can be accessed through CRUD calls
///
/// Every call is independent: there is no retry, no batching and no concurrency check.
#[async_trait]
pub trait RemoteSource {
    /// Returns every event of the collection
    async fn fetch_all(&self) -> Result<Vec<Event>, SyncError>;
    /// Adds an event to the collection, and returns the record the server has created (including its new id)
    async fn create(&self, event: &Event) -> Result<Event, SyncError>;
    /// Replaces the event that has the given id, and returns the updated record
    async fn update(&self, id: &EventId, event: &Event) -> Result<Event, SyncError>;
    /// Removes the event that has the given id
    async fn remove(&self, id: &EventId) -> Result<(), SyncError>;
}
