//! The form used to add new events, and the notices it displays

use std::time::{Duration, Instant};

use crate::config::NOTICE_DURATION;
use crate::error::{FormError, PlannerError};
use crate::event::{Event, EventDate};
use crate::store::EventStore;
use crate::traits::{KeyValueStorage, RemoteSource};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all the fields.";
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date and time.";
pub const SAVE_FAILED_MESSAGE: &str = "Unable to save the event. Please try again later.";
pub const EVENT_ADDED_MESSAGE: &str = "Event successfully added!";


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message displayed next to the form, that disappears by itself
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    text: String,
    level: NoticeLevel,
    shown_at: Instant,
}

impl Notice {
    pub fn text(&self) -> &str          { &self.text }
    pub fn level(&self) -> NoticeLevel  { self.level }
}

/// The notices currently displayed. Each one is dismissed once its display duration has elapsed
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    lifetime: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::with_lifetime(NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self { notices: Vec::new(), lifetime }
    }

    pub fn show<S: ToString>(&mut self, text: S, level: NoticeLevel) {
        self.show_at(text, level, Instant::now());
    }

    pub fn show_at<S: ToString>(&mut self, text: S, level: NoticeLevel, now: Instant) {
        self.notices.push(Notice { text: text.to_string(), level, shown_at: now });
    }

    /// Dismiss the expired notices, and return the remaining ones
    pub fn visible(&mut self, now: Instant) -> &[Notice] {
        let lifetime = self.lifetime;
        self.notices.retain(|notice| now.saturating_duration_since(notice.shown_at) < lifetime);
        &self.notices
    }
}


/// Whether a submission is being processed.
///
/// [`EventForm::submit`] and [`EventForm::submit_to_remote`] borrow the form mutably for the whole submission,
/// so callers always observe [`FormState::Idle`]. `Submitting` only exists while one of them is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormState {
    Idle,
    Submitting,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::Idle
    }
}

/// The title, date and time inputs of the "new event" form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,

    state: FormState,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set every input at once
    pub fn fill<S: ToString, T: ToString, U: ToString>(&mut self, title: S, date: T, time: U) {
        self.title = title.to_string();
        self.date = date.to_string();
        self.time = time.to_string();
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Clear every input
    pub fn reset(&mut self) {
        self.title.clear();
        self.date.clear();
        self.time.clear();
    }

    /// Build the event described by the inputs.
    ///
    /// A whitespace-only input counts as missing, but the title is kept as typed.
    pub fn to_event(&self) -> Result<Event, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingField("title"));
        }
        if self.date.trim().is_empty() {
            return Err(FormError::MissingField("date"));
        }
        if self.time.trim().is_empty() {
            return Err(FormError::MissingField("time"));
        }

        let date = EventDate::from_inputs(self.date.trim(), self.time.trim())
            .map_err(|_| FormError::InvalidDate(format!("{}T{}", self.date.trim(), self.time.trim())))?;
        Ok(Event::new(&self.title, date))
    }

    /// Validate the inputs and append the new event to the store.
    ///
    /// The inputs are cleared on success. Either way, a notice tells the user what happened.
    pub fn submit<S>(&mut self, store: &mut EventStore<S>, notices: &mut NoticeBoard) -> Result<Event, PlannerError>
    where
        S: KeyValueStorage,
    {
        self.state = FormState::Submitting;
        let result = self.validate(notices)
            .and_then(|event| self.append(event, store, notices));
        self.state = FormState::Idle;
        result
    }

    /// Validate the inputs, send the new event to the remote collection, and append the record it returns to the store.
    ///
    /// Nothing is added to the store in case the remote refuses the event.
    pub async fn submit_to_remote<S, R>(&mut self, store: &mut EventStore<S>, remote: &R, notices: &mut NoticeBoard) -> Result<Event, PlannerError>
    where
        S: KeyValueStorage,
        R: RemoteSource,
    {
        self.state = FormState::Submitting;
        let result = match self.validate(notices) {
            Err(err) => Err(err),
            Ok(event) => match remote.create(&event).await {
                Err(err) => {
                    notices.show(SAVE_FAILED_MESSAGE, NoticeLevel::Error);
                    Err(err.into())
                },
                Ok(saved) => self.append(saved, store, notices),
            },
        };
        self.state = FormState::Idle;
        result
    }

    fn validate(&self, notices: &mut NoticeBoard) -> Result<Event, PlannerError> {
        self.to_event().map_err(|err| {
            log::info!("Rejected form submission: {}", err);
            let message = match err {
                FormError::MissingField(_) => MISSING_FIELDS_MESSAGE,
                FormError::InvalidDate(_) => INVALID_DATE_MESSAGE,
            };
            notices.show(message, NoticeLevel::Error);
            err.into()
        })
    }

    fn append<S>(&mut self, event: Event, store: &mut EventStore<S>, notices: &mut NoticeBoard) -> Result<Event, PlannerError>
    where
        S: KeyValueStorage,
    {
        store.add(event.clone())?;
        self.reset();
        notices.show(EVENT_ADDED_MESSAGE, NoticeLevel::Success);
        Ok(event)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::MemoryStorage;

    #[test]
    fn notices_expire() {
        let start = Instant::now();
        let mut board = NoticeBoard::with_lifetime(Duration::from_secs(3));
        board.show_at("first", NoticeLevel::Error, start);
        board.show_at("second", NoticeLevel::Success, start + Duration::from_secs(2));

        assert_eq!(board.visible(start + Duration::from_secs(1)).len(), 2);
        let remaining = board.visible(start + Duration::from_secs(3));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text(), "second");
        assert!(board.visible(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn missing_fields() {
        let mut form = EventForm::new();
        form.fill("", "2024-06-03", "09:00");
        assert_eq!(form.to_event(), Err(FormError::MissingField("title")));
        form.fill("Standup", "", "09:00");
        assert_eq!(form.to_event(), Err(FormError::MissingField("date")));
        form.fill("Standup", "2024-06-03", " ");
        assert_eq!(form.to_event(), Err(FormError::MissingField("time")));
        form.fill("Standup", "2024-06-31", "09:00");
        assert_eq!(form.to_event(), Err(FormError::InvalidDate("2024-06-31T09:00".to_string())));
        form.fill("   ", "2024-06-03", "09:00");
        assert_eq!(form.to_event(), Err(FormError::MissingField("title")));
    }

    #[test]
    fn title_is_kept_as_typed() {
        let mut form = EventForm::new();
        form.fill("  Standup ", " 2024-06-03", "09:00 ");
        let event = form.to_event().unwrap();
        assert_eq!(event.title(), "  Standup ");
        assert_eq!(event.date().to_string(), "2024-06-03T09:00");
    }

    #[test]
    fn rejected_submission() {
        let mut store = EventStore::new(MemoryStorage::new());
        let mut notices = NoticeBoard::new();
        let mut form = EventForm::new();
        form.fill("", "2024-06-03", "09:00");

        let submitted_at = Instant::now();
        assert!(form.submit(&mut store, &mut notices).is_err());
        assert!(store.is_empty());
        assert_eq!(form.state(), FormState::Idle);
        // Inputs are kept so that the user can fix them
        assert_eq!(form.date, "2024-06-03");

        let shown = notices.visible(submitted_at);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].text(), MISSING_FIELDS_MESSAGE);
        assert_eq!(shown[0].level(), NoticeLevel::Error);

        assert!(notices.visible(submitted_at + NOTICE_DURATION + Duration::from_millis(500)).is_empty());
    }

    #[test]
    fn accepted_submission() {
        let mut store = EventStore::new(MemoryStorage::new());
        let mut notices = NoticeBoard::new();
        let mut form = EventForm::new();
        form.fill("Standup", "2024-06-03", "09:00");

        let event = form.submit(&mut store, &mut notices).unwrap();
        assert_eq!(event.date().to_string(), "2024-06-03T09:00");
        assert!(event.id().is_none());
        assert_eq!(store.events(), &[event][..]);
        assert_eq!(EventStore::from_storage(store.storage().clone()).unwrap().len(), 1);
        assert_eq!(form, EventForm::new());
        assert_eq!(notices.visible(Instant::now())[0].text(), EVENT_ADDED_MESSAGE);
    }
}
