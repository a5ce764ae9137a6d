//! An in-memory remote collection, that can replace a real server in tests
#![cfg(any(test, feature = "mock_remote"))]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::SyncError;
use crate::event::{Event, EventId};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::RemoteSource;

#[derive(Debug, Default)]
struct MockedCollection {
    events: Vec<Event>,
    last_id: u64,
}

/// A [`RemoteSource`] that stores its events in memory and assigns numeric ids, just like a basic REST server would do
///
/// Unknown ids are answered with a `404` status. Failures can be injected with a [`MockBehaviour`].
#[derive(Debug, Default, Clone)]
pub struct MockRemote {
    collection: Arc<Mutex<MockedCollection>>,
    behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mocked remote that already contains some events.
    /// Events that have no id are given one.
    pub fn with_events(events: Vec<Event>) -> Self {
        let remote = Self::new();
        {
            let mut collection = remote.collection();
            for event in events {
                let event = match event.id() {
                    Some(_) => event,
                    None => {
                        collection.last_id += 1;
                        Event::new_with_id(EventId::Number(collection.last_id), event.title(), *event.date())
                    },
                };
                collection.events.push(event);
            }
        }
        remote
    }

    /// Shares the behaviour, so that it can be tweaked while this remote is in use
    pub fn behaviour(&self) -> Arc<Mutex<MockBehaviour>> {
        Arc::clone(&self.behaviour)
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// A snapshot of the events this remote currently holds
    pub fn events(&self) -> Vec<Event> {
        self.collection().events.clone()
    }

    fn collection(&self) -> MutexGuard<'_, MockedCollection> {
        lock(&self.collection)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn fetch_all(&self) -> Result<Vec<Event>, SyncError> {
        lock(&self.behaviour).can_fetch_all()?;
        Ok(self.events())
    }

    async fn create(&self, event: &Event) -> Result<Event, SyncError> {
        lock(&self.behaviour).can_create()?;
        let mut collection = self.collection();
        collection.last_id += 1;
        let created = Event::new_with_id(EventId::Number(collection.last_id), event.title(), *event.date());
        collection.events.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &EventId, event: &Event) -> Result<Event, SyncError> {
        lock(&self.behaviour).can_update()?;
        let mut collection = self.collection();
        match collection.events.iter_mut().find(|e| e.has_id(id)) {
            None => Err(SyncError::Status(StatusCode::NOT_FOUND)),
            Some(stored) => {
                *stored = Event::new_with_id(id.clone(), event.title(), *event.date());
                Ok(stored.clone())
            },
        }
    }

    async fn remove(&self, id: &EventId) -> Result<(), SyncError> {
        lock(&self.behaviour).can_remove()?;
        let mut collection = self.collection();
        let count_before = collection.events.len();
        collection.events.retain(|e| e.has_id(id) == false);
        if collection.events.len() == count_before {
            return Err(SyncError::Status(StatusCode::NOT_FOUND));
        }
        Ok(())
    }
}
