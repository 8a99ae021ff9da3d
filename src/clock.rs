use chrono::{DateTime, Duration, Utc};

/// Wall clock used for session ids and elapsed time. `Fixed` keeps tests
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Moves a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

// Test support, public so the integration tests under `tests/` can share it.

/// Test support: 2023-11-14T22:13:20Z.
#[doc(hidden)]
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Test support: the instant behind [`FIXED_TEST_TIMESTAMP`].
#[doc(hidden)]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default()
}

/// Test support: a [`Clock::Fixed`] at [`FIXED_TEST_TIMESTAMP`].
#[doc(hidden)]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
