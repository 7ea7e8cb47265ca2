use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampMilliSeconds;

/// Wall-clock bookkeeping for one play session.
///
/// `started_timestamp` is never adjusted for pauses. Completion stats use
/// `elapsed_at`, which therefore includes paused time; `active_elapsed_at`
/// subtracts it for display purposes.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampMilliSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampMilliSeconds>")]
    pub paused_timestamp: Option<SystemTime>,
    pub paused_duration: Duration,
    #[serde_as(as = "Option<TimestampMilliSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl TimerState {
    pub fn started_at(now: SystemTime) -> Self {
        Self {
            started_timestamp: now,
            paused_timestamp: None,
            paused_duration: Duration::from_secs(0),
            ended_timestamp: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_timestamp.is_some()
    }

    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        self.ended_timestamp
            .unwrap_or(now)
            .duration_since(self.started_timestamp)
            .unwrap_or_default()
    }

    pub fn active_elapsed_at(&self, now: SystemTime) -> Duration {
        let until_time = self
            .paused_timestamp
            .or(self.ended_timestamp)
            .unwrap_or(now);

        until_time
            .duration_since(self.started_timestamp)
            .unwrap_or_default()
            .saturating_sub(self.paused_duration)
    }

    pub fn paused(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if new_state.paused_timestamp.is_none() {
            new_state.paused_timestamp = Some(now);
        }
        new_state
    }

    pub fn resumed(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if let Some(pause_time) = new_state.paused_timestamp.take() {
            new_state.paused_duration = new_state
                .paused_duration
                .saturating_add(now.duration_since(pause_time).unwrap_or_default());
        }
        new_state
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.resumed(now);
        new_state.ended_timestamp = Some(now);
        new_state
    }
}
