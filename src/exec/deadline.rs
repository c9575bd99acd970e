// src/exec/deadline.rs

//! One time budget shared by every process a resolution run spawns.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;

/// How a bounded future ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounded<T> {
    Completed(T),
    /// The deadline passed; carries the budget that was configured.
    TimedOut(Duration),
    Cancelled,
}

/// An optional point in time after which work is abandoned.
///
/// Created once per run and copied into every task, so executables and the
/// backend call all count against the same budget instead of each getting
/// a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    budget: Option<Duration>,
    at: Option<Instant>,
}

impl Deadline {
    pub fn unbounded() -> Self {
        Self {
            budget: None,
            at: None,
        }
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            budget: Some(budget),
            at: Some(Instant::now() + budget),
        }
    }

    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        match seconds {
            Some(secs) => Self::after(Duration::from_secs(secs)),
            None => Self::unbounded(),
        }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Time left, or `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// The earlier of this deadline and `limit` from now.
    pub fn capped(&self, limit: Duration) -> Self {
        let fixed = Instant::now() + limit;
        match self.at {
            Some(at) if at <= fixed => *self,
            _ => Self {
                budget: Some(limit),
                at: Some(fixed),
            },
        }
    }

    /// Drive `fut` until it completes, the deadline passes or `cancel` fires.
    ///
    /// Dropping `fut` on timeout or cancellation is what stops the work, so
    /// process futures must be built with `kill_on_drop(true)`.
    pub async fn run<F: Future>(&self, cancel: &CancellationToken, fut: F) -> Bounded<F::Output> {
        let bounded = async {
            match self.at {
                Some(at) => timeout_at(at, fut).await.ok(),
                None => Some(fut.await),
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => Bounded::Cancelled,
            res = bounded => match res {
                Some(value) => Bounded::Completed(value),
                None => Bounded::TimedOut(self.budget.unwrap_or_default()),
            },
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unbounded()
    }
}
