//! Simulated streaming of an already-complete response.
//!
//! The backend returns the whole assistant reply at once.  The client reveals
//! it one character (Unicode scalar value) per tick of a fixed 10 ms period, so
//! a reply of N characters is fully visible after exactly N ticks and an empty
//! reply after none.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Period between reveal steps.
pub const REVEAL_TICK: Duration = Duration::from_millis(10);

/// A source of evenly spaced ticks.
#[async_trait::async_trait]
pub trait Ticker: Send {
    /// Waits for the next tick.
    async fn tick(&mut self);
}

/// A [`Ticker`] backed by `tokio::time::interval`.
///
/// The first tick fires one full period after creation.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

////////////////////////////////////////////// Reveal /////////////////////////////////////////////

/// The reveal state of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    full: String,
    // Byte offset of the visible prefix; always on a char boundary.
    visible: usize,
    ticks: usize,
}

impl Reveal {
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            visible: 0,
            ticks: 0,
        }
    }

    /// Reveals one more character; returns it, or `None` once complete.
    pub fn step(&mut self) -> Option<char> {
        let next = self.full[self.visible..].chars().next()?;
        self.visible += next.len_utf8();
        self.ticks += 1;
        Some(next)
    }

    /// The currently visible prefix.
    pub fn visible(&self) -> &str {
        &self.full[..self.visible]
    }

    /// The complete content.
    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn is_complete(&self) -> bool {
        self.visible == self.full.len()
    }

    /// Steps taken so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Total steps required; the character count of the content.
    pub fn total_ticks(&self) -> usize {
        self.full.chars().count()
    }
}

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every character was revealed.
    Completed { ticks: usize },
    /// The view was torn down first.
    Cancelled { ticks: usize },
}

impl RevealOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RevealOutcome::Completed { .. })
    }

    pub fn ticks(&self) -> usize {
        match self {
            RevealOutcome::Completed { ticks } | RevealOutcome::Cancelled { ticks } => *ticks,
        }
    }
}

//////////////////////////////////////////// RevealController /////////////////////////////////////

/// Drives a [`Reveal`] from a [`Ticker`] until complete or cancelled.
pub struct RevealController<T: Ticker> {
    ticker: T,
    cancel: CancellationToken,
}

impl RevealController<IntervalTicker> {
    /// A controller ticking every [`REVEAL_TICK`].
    pub fn with_default_period(cancel: CancellationToken) -> Self {
        Self::new(IntervalTicker::new(REVEAL_TICK), cancel)
    }
}

impl<T: Ticker> RevealController<T> {
    pub fn new(ticker: T, cancel: CancellationToken) -> Self {
        Self { ticker, cancel }
    }

    /// Runs `reveal` to completion.
    ///
    /// `on_frame` is called after every tick with the newly revealed character
    /// and the visible prefix.  Cancellation is observed before each tick.
    pub async fn run<F>(&mut self, reveal: &mut Reveal, mut on_frame: F) -> RevealOutcome
    where
        F: FnMut(char, &str) + Send,
    {
        while !reveal.is_complete() {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::debug!(ticks = reveal.ticks(), "reveal cancelled");
                    return RevealOutcome::Cancelled { ticks: reveal.ticks() };
                }
                _ = self.ticker.tick() => {
                    if let Some(delta) = reveal.step() {
                        on_frame(delta, reveal.visible());
                    }
                }
            }
        }
        RevealOutcome::Completed {
            ticks: reveal.ticks(),
        }
    }
}
