//! This module provides ways to tweak a [`MockRemote`](crate::mock_remote::MockRemote), so that it can return errors on some tests
#![cfg(any(test, feature = "mock_remote"))]

use crate::error::SyncError;

/// This stores some behaviour tweaks, that describe how a mocked remote will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub fetch_all_behaviour: (u32, u32),
    pub create_behaviour: (u32, u32),
    pub update_behaviour: (u32, u32),
    pub remove_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_all_behaviour: (0, n_fails),
            create_behaviour: (0, n_fails),
            update_behaviour: (0, n_fails),
            remove_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_all(&mut self) -> Result<(), SyncError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_all_behaviour, "fetch_all")
    }
    pub fn can_create(&mut self) -> Result<(), SyncError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_behaviour, "create")
    }
    pub fn can_update(&mut self) -> Result<(), SyncError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_behaviour, "update")
    }
    pub fn can_remove(&mut self) -> Result<(), SyncError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.remove_behaviour, "remove")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), SyncError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(SyncError::Mocked(format!("{} ({:?})", descr, value)))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_fetch_all().is_ok());
            assert!(ok.can_remove().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch_all().is_err());
        assert!(now.can_create().is_err());
        assert!(now.can_create().is_err());
        assert!(now.can_fetch_all().is_err());
        assert!(now.can_fetch_all().is_ok());
        assert!(now.can_create().is_ok());

        let mut custom = MockBehaviour{
            update_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_update().is_ok());
        assert!(custom.can_update().is_err());
        custom.suspend();
        assert!(custom.can_update().is_ok());
        custom.resume();
        assert!(custom.can_update().is_err());
        assert!(custom.can_update().is_ok());
        assert!(custom.can_create().is_ok());
    }
}
