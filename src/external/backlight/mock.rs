use std::{
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::Backlight;
use crate::error::{BrightnessError, Result};

#[derive(Debug, Default)]
struct MockState {
    level: i64,
    garbage: Option<String>,
    writes: Vec<i64>,
    should_fail: bool,
    writes_before_failure: Option<usize>,
}

/// A mock [Backlight], usable when testing code which drives the device.
///
/// Clones share the same state, so a test can keep one clone for inspection
/// while the code under test owns another.
#[derive(Debug, Clone)]
pub struct MockBacklight {
    max_level: i64,
    state: Arc<Mutex<MockState>>,
}

impl MockBacklight {
    /// Create a new backlight, with the specified initial and maximum level
    pub fn new(initial_level: i64, max_level: i64) -> MockBacklight {
        MockBacklight {
            max_level,
            state: Arc::new(Mutex::new(MockState {
                level: initial_level,
                ..Default::default()
            })),
        }
    }

    pub fn level(&self) -> i64 {
        self.state.lock().unwrap().level
    }

    /// Every level written so far, oldest first
    pub fn writes(&self) -> Vec<i64> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Set whether reads and writes on this backlight should return an error
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.state.lock().unwrap().should_fail = should_fail;
    }

    /// Make reads return the given content, as if the device file contained it
    pub fn set_garbage_content(&self, content: &str) {
        self.state.lock().unwrap().garbage = Some(content.to_owned());
    }

    /// Let `count` more writes succeed, then fail every following one
    pub fn fail_writes_after(&self, count: usize) {
        let mut state = self.state.lock().unwrap();
        state.writes_before_failure = Some(state.writes.len() + count);
    }

    fn path() -> PathBuf {
        PathBuf::from("mock")
    }
}

#[async_trait]
impl Backlight for MockBacklight {
    fn max_level(&self) -> i64 {
        self.max_level
    }

    async fn read_level(&self) -> Result<i64> {
        let state = self.state.lock().unwrap();
        if state.should_fail {
            return Err(BrightnessError::DeviceRead {
                path: Self::path(),
                source: io::Error::new(io::ErrorKind::Other, "Mock failure"),
            });
        }
        match &state.garbage {
            Some(content) => Err(BrightnessError::unparsable(Self::path(), content)),
            None => Ok(state.level),
        }
    }

    async fn write_level(&self, level: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let exhausted = state
            .writes_before_failure
            .map_or(false, |limit| state.writes.len() >= limit);
        if state.should_fail || exhausted {
            return Err(BrightnessError::DeviceWrite {
                path: Self::path(),
                level,
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        state.writes.push(level);
        state.level = level;
        Ok(())
    }
}
