//! Calendar events

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Format used by the date and time inputs of the form, once joined by a `T`
const MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Same as [`MINUTES_FORMAT`], with (optionally fractional) seconds
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";


/// The identifier the remote collection gave to an event.
///
/// Depending on the server, this can either be a number or a string. It is serialized back the way it was received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(u64),
    Text(String),
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => EventId::Number(n),
            Err(_) => EventId::Text(s.to_string()),
        })
    }
}

impl From<u64> for EventId {
    fn from(n: u64) -> Self {
        EventId::Number(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}



/// The date and time of an event.
///
/// It is exchanged as an ISO-like `YYYY-MM-DDTHH:MM` string, and is guaranteed to be a valid calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate {
    content: NaiveDateTime,
}

impl EventDate {
    /// Build a date from the separate values of a date input (`YYYY-MM-DD`) and a time input (`HH:MM`)
    pub fn from_inputs(date: &str, time: &str) -> Result<Self, chrono::ParseError> {
        format!("{}T{}", date, time).parse()
    }

    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.content
    }

    pub fn date(&self) -> NaiveDate {
        self.content.date()
    }
}

impl From<NaiveDateTime> for EventDate {
    fn from(content: NaiveDateTime) -> Self {
        Self { content }
    }
}

impl FromStr for EventDate {
    type Err = chrono::ParseError;

    /// Parses `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]`, or an RFC 3339 string.
    /// In the latter case, the offset is dropped and the wall-clock time is kept.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = NaiveDateTime::parse_from_str(s, MINUTES_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, SECONDS_FORMAT))
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_local()))?;
        Ok(Self { content })
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if self.content.second() == 0 && self.content.nanosecond() == 0 {
            write!(f, "{}", self.content.format(MINUTES_FORMAT))
        } else {
            write!(f, "{}", self.content.format(SECONDS_FORMAT))
        }
    }
}

/// Used to support serde
impl Serialize for EventDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D>(deserializer: D) -> Result<EventDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|err| serde::de::Error::custom(format!("invalid event date {:?}: {}", s, err)))
    }
}



/// A scheduled item, with a title and a date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Only known once the remote collection has accepted this event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EventId>,
    title: String,
    date: EventDate,
}

impl Event {
    /// Create an event that has not been sent to a remote collection
    pub fn new<S: ToString>(title: S, date: EventDate) -> Self {
        Self { id: None, title: title.to_string(), date }
    }

    /// Create an event that is already known by a remote collection
    pub fn new_with_id<S: ToString>(id: EventId, title: S, date: EventDate) -> Self {
        Self { id: Some(id), title: title.to_string(), date }
    }

    pub fn id(&self) -> Option<&EventId> { self.id.as_ref() }
    pub fn title(&self) -> &str          { &self.title      }
    pub fn date(&self) -> &EventDate     { &self.date       }

    /// Whether this event takes place on the given day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date.date() == day
    }

    /// Whether this event has the given id
    pub fn has_id(&self, id: &EventId) -> bool {
        self.id.as_ref() == Some(id)
    }
}
