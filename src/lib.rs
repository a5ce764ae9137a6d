//! This crate provides a month calendar and a schedule of events.
//!
//! Events are kept in a local [`EventStore`](store::EventStore), backed by a key-value storage (see the [`storage`] module) so that they can be displayed quickly on startup. \
//! They can also be mirrored to a remote REST collection, using the [`client`] module.
//!
//! These two data sources are combined by a [`Planner`], which also renders the [`calendar`] grid and the [`schedule`] list,
//! and handles the [`form`] used to add new events.

pub mod traits;
pub mod error;

mod event;
pub use event::{Event, EventDate, EventId};
pub mod storage;
pub mod store;
pub use store::EventStore;

pub mod client;
pub mod mock_behaviour;
pub mod mock_remote;

pub mod calendar;
pub mod schedule;
pub mod form;
pub mod planner;
pub use planner::Planner;

pub mod config;
pub mod utils;
