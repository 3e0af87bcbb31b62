//! Trailing-edge debouncer.

use super::clock::Clock;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due_ms: u64,
}

/// Holds the most recent input until no newer input arrived for `delay_ms`.
///
/// Each [`push`](Self::push) replaces the pending value and restarts the
/// timer, so a superseded value never fires.
#[derive(Debug, Clone)]
pub struct Debouncer<T, C> {
    clock: C,
    delay_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T, C: Clock> Debouncer<T, C> {
    pub fn new(delay_ms: u64, clock: C) -> Self {
        Self {
            clock,
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Queue `value`, discarding any pending one and restarting the timer.
    pub fn push(&mut self, value: T) {
        let due_ms = self.clock.now_ms().saturating_add(self.delay_ms);
        self.pending = Some(Pending { value, due_ms });
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        let now = self.clock.now_ms();
        if self.pending.as_ref()?.due_ms <= now {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// Take the pending value immediately, ignoring the timer.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Discard the pending value.
    pub fn cancel(&mut self) -> Option<T> {
        self.flush()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending value fires.
    pub fn remaining_ms(&self) -> Option<u64> {
        let pending = self.pending.as_ref()?;
        Some(pending.due_ms.saturating_sub(self.clock.now_ms()))
    }
}
