//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;
use once_cell::sync::Lazy;

/// URL of the remote event collection used by [`Client::from_config`](crate::client::Client::from_config).
/// Feel free to override it when initing this library.
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://mock-api.example.com/events".to_string())));

/// The key under which the event collection is stored in the local storage
pub const STORAGE_KEY: &str = "events";

/// How long a form notice (success or error message) stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Returns the current value of [`API_BASE_URL`]
pub fn api_base_url() -> String {
    match API_BASE_URL.lock() {
        Ok(url) => url.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replaces the value of [`API_BASE_URL`]
pub fn set_api_base_url<S: ToString>(url: S) {
    let mut current = match API_BASE_URL.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *current = url.to_string();
}
