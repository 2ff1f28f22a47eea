use std::{future::Future, time::Duration};

use tokio::time::{self, Instant};

/// Point in time after which the login flow gives up.
///
/// Created once per run and passed by value into every step, so the
/// credential lookup and the token request share a single budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

/// The wrapped future did not finish before the deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired(pub Duration);

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Total budget this deadline was created with
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Drive `fut` to completion unless the deadline passes first
    pub async fn run<F: Future>(self, fut: F) -> Result<F::Output, Expired> {
        time::timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| Expired(self.budget))
    }
}
