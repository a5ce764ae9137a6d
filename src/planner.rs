//! This module ties the local store, the remote collection and the views together
//!
//! When a remote collection is configured, it is the reference: mutations reach the local store only once the remote has accepted them,
//! and the store keeps the record the remote has returned.
//! Without a remote, mutations are directly applied to the local store.

use chrono::NaiveDate;

use crate::calendar::{self, MonthGrid};
use crate::error::{PlannerError, StoreError};
use crate::event::{Event, EventId};
use crate::form::{EventForm, NoticeBoard};
use crate::schedule;
use crate::store::EventStore;
use crate::traits::{KeyValueStorage, RemoteSource};


/// Everything that has to be displayed at a given time
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerView {
    pub month_label: String,
    pub grid: MonthGrid,
    pub schedule: Vec<String>,
}


/// An event planner, that owns a local [`EventStore`] and (optionally) mirrors it to a [`RemoteSource`]
#[derive(Debug)]
pub struct Planner<S, R>
where
    S: KeyValueStorage,
    R: RemoteSource,
{
    store: EventStore<S>,
    remote: Option<R>,
    form: EventForm,
    notices: NoticeBoard,
    /// The first day of the displayed month
    current_month: NaiveDate,
}

impl<S, R> Planner<S, R>
where
    S: KeyValueStorage,
    R: RemoteSource,
{
    /// Create a planner that displays the month of `today`.
    ///
    /// `remote` is usually a [`Client`](crate::client::Client). Use `None` to only work with the local store.
    /// Call [`Self::init`] before using it.
    pub fn new(storage: S, remote: Option<R>, today: NaiveDate) -> Self {
        Self {
            store: EventStore::new(storage),
            remote,
            form: EventForm::new(),
            notices: NoticeBoard::new(),
            current_month: calendar::month_start(today),
        }
    }

    /// Load the local events, then replace them with the remote ones (if any).
    ///
    /// Only an unreadable local storage is an error. A remote failure is logged, and the local events are kept.
    pub async fn init(&mut self) -> Result<(), StoreError> {
        self.store.load()?;
        self.pull().await
    }

    /// Replace the local events with the content of the remote collection.
    /// Nothing happens in case there is no remote, or if the remote is empty or unreachable.
    pub async fn pull(&mut self) -> Result<(), StoreError> {
        let remote = match &self.remote {
            None => return Ok(()),
            Some(remote) => remote,
        };

        match remote.fetch_all().await {
            Err(err) => {
                log::warn!("Unable to fetch the remote events ({}). Keeping the {} local ones", err, self.store.len());
                Ok(())
            },
            Ok(events) if events.is_empty() => {
                log::info!("The remote collection is empty. Keeping the {} local events", self.store.len());
                Ok(())
            },
            Ok(events) => {
                log::info!("Replacing local events with {} remote ones", events.len());
                self.store.replace_all(events)
            },
        }
    }

    pub fn store(&self) -> &EventStore<S>     { &self.store   }
    pub fn remote(&self) -> Option<&R>        { self.remote.as_ref() }
    pub fn form(&self) -> &EventForm          { &self.form    }
    pub fn form_mut(&mut self) -> &mut EventForm { &mut self.form }
    pub fn notices_mut(&mut self) -> &mut NoticeBoard { &mut self.notices }
    pub fn current_month(&self) -> NaiveDate  { self.current_month }

    /// Display the month `delta` months away from the current one (e.g. `-1` for the previous month).
    ///
    /// Returns `false`, and keeps the current month, if the target month cannot be represented.
    pub fn change_month(&mut self, delta: i32) -> bool {
        match calendar::shift_month(self.current_month, delta) {
            Some(month) => {
                self.current_month = month;
                true
            },
            None => {
                log::warn!("Cannot move {} months away from {}", delta, calendar::month_label(self.current_month));
                false
            },
        }
    }

    /// Display the month that contains `date`
    pub fn set_month(&mut self, date: NaiveDate) {
        self.current_month = calendar::month_start(date);
    }

    pub fn render(&self) -> PlannerView {
        let grid = calendar::render_month(self.current_month, self.store.events());
        PlannerView {
            month_label: grid.label(),
            grid,
            schedule: schedule::schedule_list(self.store.events()),
        }
    }

    /// Submit the form: the new event is created on the remote first (if any), then added to the local store
    pub async fn submit_form(&mut self) -> Result<Event, PlannerError> {
        match &self.remote {
            None => self.form.submit(&mut self.store, &mut self.notices),
            Some(remote) => self.form.submit_to_remote(&mut self.store, remote, &mut self.notices).await,
        }
    }

    /// Replace an event with a new version.
    ///
    /// In case the remote refuses the change, the local store is left untouched.
    pub async fn update_event(&mut self, id: &EventId, event: Event) -> Result<Event, PlannerError> {
        let updated = match &self.remote {
            None => Event::new_with_id(id.clone(), event.title(), *event.date()),
            Some(remote) => remote.update(id, &event).await?,
        };

        if self.store.replace(id, updated.clone())? == false {
            log::warn!("Event {} is not known locally", id);
            if self.remote.is_none() {
                return Err(PlannerError::UnknownEvent(id.clone()));
            }
        }
        Ok(updated)
    }

    /// Remove an event.
    ///
    /// In case the remote refuses the deletion, the local store is left untouched.
    pub async fn delete_event(&mut self, id: &EventId) -> Result<(), PlannerError> {
        if let Some(remote) = &self.remote {
            remote.remove(id).await?;
        }

        if self.store.remove(id)? == false {
            log::warn!("Event {} is not known locally", id);
            if self.remote.is_none() {
                return Err(PlannerError::UnknownEvent(id.clone()));
            }
        }
        Ok(())
    }
}
