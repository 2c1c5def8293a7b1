//! Debounced, rate-limited publication of the session token to the page URL.
//!
//! A single-slot pending-write scheduler: each state change arms (or re-arms)
//! one pending write 500ms out, and a minimum-interval gate drops writes that
//! would land within 100ms of the previous one. Pure timing logic lives in
//! [`UrlSyncScheduler`]; [`SessionUrlSync`] wires it to browser timers and
//! the history API.

use std::cell::RefCell;
use std::rc::Rc;

use browser_host::TimeoutHandle;

/// Quiet period after the most recent state change before the URL is written.
pub const URL_WRITE_DEBOUNCE_MS: u64 = 500;
/// Minimum spacing between two history writes; a write due sooner is dropped.
pub const URL_WRITE_MIN_INTERVAL_MS: u64 = 100;

/// What [`UrlSyncScheduler::try_flush`] decided for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No write is pending, or the deadline has not arrived yet.
    NotDue,
    /// A write was due but fell inside the minimum-interval gate; it is
    /// dropped, not rescheduled.
    Suppressed,
    /// The pending write should be performed now.
    Write,
}

/// Pure single-slot write scheduler. Holds at most one pending write; a newer
/// state change replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSyncScheduler {
    pending_deadline_ms: Option<u64>,
    last_write_ms: Option<u64>,
}

impl UrlSyncScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a state change, replacing any pending write with one due a
    /// full debounce interval from `now_ms`.
    pub fn note_change(&mut self, now_ms: u64) {
        self.pending_deadline_ms = Some(now_ms + URL_WRITE_DEBOUNCE_MS);
    }

    /// The instant the pending write is due, if one is armed.
    pub fn pending_deadline_ms(&self) -> Option<u64> {
        self.pending_deadline_ms
    }

    /// Resolves the pending write at `now_ms`. Due writes are consumed
    /// whether performed or suppressed.
    pub fn try_flush(&mut self, now_ms: u64) -> FlushOutcome {
        match self.pending_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.pending_deadline_ms = None;
                let gated = self
                    .last_write_ms
                    .is_some_and(|last| now_ms.saturating_sub(last) < URL_WRITE_MIN_INTERVAL_MS);
                if gated {
                    FlushOutcome::Suppressed
                } else {
                    self.last_write_ms = Some(now_ms);
                    FlushOutcome::Write
                }
            }
            _ => FlushOutcome::NotDue,
        }
    }
}

/// Publishes session tokens to the address bar on the scheduler's cadence.
///
/// Holds a token source (usually a closure over the shared session) so the
/// token reflects the state at write time, not at schedule time. Writes go
/// through history-replace semantics and never navigate.
#[derive(Clone)]
pub struct SessionUrlSync {
    scheduler: Rc<RefCell<UrlSyncScheduler>>,
    token_source: Rc<dyn Fn() -> Option<String>>,
    timer: Rc<RefCell<Option<TimeoutHandle>>>,
}

impl SessionUrlSync {
    /// Creates a writer over a token source. The source returns `None` when
    /// no windows are open, which removes the parameter on the next write.
    pub fn new(token_source: impl Fn() -> Option<String> + 'static) -> Self {
        Self {
            scheduler: Rc::new(RefCell::new(UrlSyncScheduler::new())),
            token_source: Rc::new(token_source),
            timer: Rc::new(RefCell::new(None)),
        }
    }

    /// Notes a state change and (re-)arms the browser timer for the new
    /// deadline. Off-browser no timer exists; drive [`flush_at`](Self::flush_at)
    /// directly.
    pub fn note_state_changed(&self) {
        let now_ms = browser_host::unix_time_ms_now();
        self.scheduler.borrow_mut().note_change(now_ms);
        if let Some(stale) = self.timer.borrow_mut().take() {
            browser_host::clear_timeout(stale);
        }
        let sync = self.clone();
        let armed = browser_host::schedule_timeout(URL_WRITE_DEBOUNCE_MS as u32, move || {
            sync.flush_at(browser_host::unix_time_ms_now());
        });
        *self.timer.borrow_mut() = armed;
    }

    /// Resolves the pending write at `now_ms`, publishing the current token
    /// when the scheduler allows it. Returns the scheduler's decision.
    pub fn flush_at(&self, now_ms: u64) -> FlushOutcome {
        let outcome = self.scheduler.borrow_mut().try_flush(now_ms);
        if outcome == FlushOutcome::Write {
            let token = (self.token_source)();
            browser_host::replace_state_param(token.as_deref());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn a_due_write_fires_once_and_clears_the_slot() {
        let mut scheduler = UrlSyncScheduler::new();
        scheduler.note_change(1_000);

        assert_eq!(scheduler.try_flush(1_400), FlushOutcome::NotDue);
        assert_eq!(scheduler.try_flush(1_500), FlushOutcome::Write);
        assert_eq!(scheduler.try_flush(1_501), FlushOutcome::NotDue);
    }

    #[test]
    fn a_newer_change_replaces_the_pending_write() {
        let mut scheduler = UrlSyncScheduler::new();
        scheduler.note_change(1_000);
        scheduler.note_change(1_300);

        assert_eq!(scheduler.pending_deadline_ms(), Some(1_800));
        assert_eq!(scheduler.try_flush(1_500), FlushOutcome::NotDue);
        assert_eq!(scheduler.try_flush(1_800), FlushOutcome::Write);
    }

    #[test]
    fn writes_inside_the_minimum_interval_are_dropped() {
        let mut scheduler = UrlSyncScheduler::new();

        // The gate compares against the previous write instant no matter how
        // the flush was driven: a due write 50ms behind the last one drops.
        scheduler.note_change(1_000);
        assert_eq!(scheduler.try_flush(1_900), FlushOutcome::Write);
        scheduler.note_change(1_450);
        assert_eq!(scheduler.try_flush(1_950), FlushOutcome::Suppressed);

        // The suppressed write is dropped, not rescheduled.
        assert_eq!(scheduler.try_flush(2_400), FlushOutcome::NotDue);

        // Past the gate, writes resume.
        scheduler.note_change(2_000);
        assert_eq!(scheduler.try_flush(2_500), FlushOutcome::Write);
    }

    #[test]
    fn the_writer_reads_its_token_at_flush_time() {
        use std::cell::Cell;

        let calls = Rc::new(Cell::new(0u32));
        let source_calls = calls.clone();
        let sync = SessionUrlSync::new(move || {
            source_calls.set(source_calls.get() + 1);
            Some("tok".to_string())
        });

        sync.scheduler.borrow_mut().note_change(2_000);
        assert_eq!(calls.get(), 0);
        assert_eq!(sync.flush_at(2_500), FlushOutcome::Write);
        assert_eq!(calls.get(), 1);
        assert_eq!(sync.flush_at(2_600), FlushOutcome::NotDue);
        assert_eq!(calls.get(), 1);
    }
}
