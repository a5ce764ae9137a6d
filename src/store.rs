//! This module provides the local store of events

use crate::config::STORAGE_KEY;
use crate::error::StoreError;
use crate::event::{Event, EventId};
use crate::traits::KeyValueStorage;


/// An ordered collection of events, persisted to a [`KeyValueStorage`]
///
/// Every mutation is immediately saved to the storage.
#[derive(Debug, PartialEq)]
pub struct EventStore<S: KeyValueStorage> {
    storage: S,
    events: Vec<Event>,
}

impl<S: KeyValueStorage> EventStore<S> {
    /// Initialize an empty store. Call [`Self::load`] to retrieve the stored events
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            events: Vec::new(),
        }
    }

    /// Initialize a store from the content of its storage
    pub fn from_storage(storage: S) -> Result<Self, StoreError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory events with the ones from the storage.
    ///
    /// In case nothing has been stored yet, the in-memory events are left untouched.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.storage.get_item(STORAGE_KEY)? {
            None => {
                log::debug!("No stored events yet");
            },
            Some(content) => {
                self.events = serde_json::from_str(&content)?;
                log::info!("Loaded {} events", self.events.len());
            },
        }
        Ok(())
    }

    /// Write the current events to the storage, overwriting its previous content
    pub fn save(&mut self) -> Result<(), StoreError> {
        let content = serde_json::to_string(&self.events)?;
        self.storage.set_item(STORAGE_KEY, &content)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the first event that has the given id
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.has_id(id))
    }

    /// Returns the id of the first event whose id reads as `raw`, whether the id is a number or a string
    pub fn id_matching(&self, raw: &str) -> Option<EventId> {
        self.events.iter()
            .filter_map(|event| event.id())
            .find(|id| id.to_string() == raw)
            .cloned()
    }

    /// Append an event
    pub fn add(&mut self, event: Event) -> Result<(), StoreError> {
        log::debug!("Adding event {:?}", event.title());
        self.events.push(event);
        self.save()
    }

    /// Replace the first event that has the given id.
    /// Returns `false` (and changes nothing) in case there is no such event
    pub fn replace(&mut self, id: &EventId, event: Event) -> Result<bool, StoreError> {
        match self.events.iter().position(|e| e.has_id(id)) {
            None => Ok(false),
            Some(index) => {
                self.events[index] = event;
                self.save()?;
                Ok(true)
            },
        }
    }

    /// Remove every event that has the given id.
    /// Returns `false` (and changes nothing) in case there is no such event
    pub fn remove(&mut self, id: &EventId) -> Result<bool, StoreError> {
        let count_before = self.events.len();
        self.events.retain(|e| e.has_id(id) == false);
        if self.events.len() == count_before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Replace every event at once
    pub fn replace_all(&mut self, events: Vec<Event>) -> Result<(), StoreError> {
        self.events = events;
        self.save()
    }
}
