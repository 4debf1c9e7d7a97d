//! Test doubles for the application ports

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{Clock, InputSource};

/// Input replaying a fixed script of lines.
pub struct ScriptedInput {
    lines: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Non-empty prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            self.prompts.lock().unwrap().push(prompt.to_string());
        }
        self.lines.lock().unwrap().pop_front()
    }
}

/// Clock that only moves when told to, or by a fixed step after every reading.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    tick: Duration,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            tick: Duration::zero(),
        }
    }

    /// Every call to `now` returns the current time, then moves it by `tick`.
    pub fn ticking(now: DateTime<Utc>, tick: Duration) -> Self {
        Self {
            now: Mutex::new(now),
            tick,
        }
    }

    /// 2024-03-01 08:00:00 UTC
    pub fn morning() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        let current = *now;
        *now += self.tick;
        current
    }
}
