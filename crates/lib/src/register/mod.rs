//! Debounced register of the paths currently mounted by the UI.
//!
//! Mount and unmount calls are recorded as they happen and accumulated into a
//! [`RegisterEvent`]. The batch is delivered to listeners once the debounce
//! window passes without further calls, so a whole subtree of fields mounting
//! at once produces a single notification.
//!
//! The register never spawns timers on its own. The pending flush is an
//! explicit [`FlushSchedule`] with a deadline on the register's [`Clock`];
//! the owner drives it with [`FieldRegister::poll`] (or
//! [`FormEngine::settle`](crate::FormEngine::settle), which sleeps until the
//! deadline).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formstate::{FieldRegister, FixedClock, Path};
//!
//! let clock = Arc::new(FixedClock::new(0));
//! let mut register = FieldRegister::with_clock(clock.clone());
//!
//! register.register(Path::parse("name"));
//! register.register(Path::parse("email"));
//! assert!(register.poll().is_none()); // window still open
//!
//! clock.advance(10);
//! let batch = register.poll().unwrap();
//! assert_eq!(batch.registered.len(), 2);
//! ```

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    clock::{Clock, SystemClock},
    constants::DEBOUNCE_WINDOW,
    path::Path,
};

/// Paths registered and unregistered during one debounce window, in call order.
///
/// Opposite events are not cancelled against each other: a path mounted and
/// unmounted within the same window appears in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEvent {
    pub registered: Vec<Path>,
    pub unregistered: Vec<Path>,
}

impl RegisterEvent {
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty() && self.unregistered.is_empty()
    }
}

/// Callback receiving flushed batches.
pub type RegisterListener = Box<dyn FnMut(&RegisterEvent) + Send>;

/// Handle returned by [`FieldRegister::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// State of the register's single debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushSchedule {
    /// No batch is waiting.
    #[default]
    Idle,
    /// A batch is waiting; it flushes once the clock reaches `deadline_ms`.
    Pending { deadline_ms: u64 },
}

/// Multiset of live paths plus the pending batch of changes.
pub struct FieldRegister {
    live: Vec<Path>,
    pending: RegisterEvent,
    schedule: FlushSchedule,
    window: Duration,
    clock: Arc<dyn Clock>,
    listeners: Vec<(ListenerId, RegisterListener)>,
    next_listener: u64,
}

impl FieldRegister {
    /// Creates a register on the system clock with the default window.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            live: Vec::new(),
            pending: RegisterEvent::default(),
            schedule: FlushSchedule::Idle,
            window: DEBOUNCE_WINDOW,
            clock,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Sets the debounce window. Takes effect from the next register call.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Marks `path` live. Registering the same path twice keeps two entries.
    pub fn register(&mut self, path: Path) {
        tracing::trace!(path = %path, "Registering field");
        self.live.push(path.clone());
        self.pending.registered.push(path);
        self.reschedule();
    }

    /// Removes one live entry equal to `path` (the first match).
    ///
    /// The call is recorded in the pending batch even if nothing was live.
    pub fn unregister(&mut self, path: &Path) {
        tracing::trace!(path = %path, "Unregistering field");
        if let Some(position) = self.live.iter().position(|live| live == path) {
            self.live.remove(position);
        }
        self.pending.unregistered.push(path.clone());
        self.reschedule();
    }

    fn reschedule(&mut self) {
        let deadline_ms = self.clock.now_millis() + self.window.as_millis() as u64;
        self.schedule = FlushSchedule::Pending { deadline_ms };
    }

    pub fn schedule(&self) -> FlushSchedule {
        self.schedule
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.schedule, FlushSchedule::Pending { .. })
    }

    /// Time left until the pending batch is due, or `None` when idle.
    pub fn time_until_flush(&self) -> Option<Duration> {
        match self.schedule {
            FlushSchedule::Idle => None,
            FlushSchedule::Pending { deadline_ms } => Some(Duration::from_millis(
                deadline_ms.saturating_sub(self.clock.now_millis()),
            )),
        }
    }

    /// Flushes the pending batch if its window has elapsed.
    pub fn poll(&mut self) -> Option<RegisterEvent> {
        match self.schedule {
            FlushSchedule::Pending { deadline_ms } if self.clock.now_millis() >= deadline_ms => {
                self.flush()
            }
            _ => None,
        }
    }

    /// Flushes the pending batch now, regardless of the deadline.
    ///
    /// Every listener is called exactly once with the batch, which is then
    /// cleared and returned.
    pub fn flush(&mut self) -> Option<RegisterEvent> {
        self.schedule = FlushSchedule::Idle;
        if self.pending.is_empty() {
            return None;
        }
        let batch = std::mem::take(&mut self.pending);
        tracing::debug!(
            registered = batch.registered.len(),
            unregistered = batch.unregistered.len(),
            listeners = self.listeners.len(),
            "Flushing field register"
        );
        for (_, listener) in &mut self.listeners {
            listener(&batch);
        }
        Some(batch)
    }

    /// Subscribes to flushed batches.
    ///
    /// If paths are already live, the listener is first called synchronously
    /// with all of them as `registered`.
    pub fn add_listener<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(&RegisterEvent) + Send + 'static,
    {
        if !self.live.is_empty() {
            listener(&RegisterEvent {
                registered: self.live.clone(),
                unregistered: Vec::new(),
            });
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribes a listener. Returns false if it was not subscribed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// True iff some live entry has the same canonical path.
    pub fn includes_path(&self, path: &Path) -> bool {
        self.live.iter().any(|live| live == path)
    }

    /// Live entries in registration order, duplicates included.
    pub fn live_paths(&self) -> &[Path] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Default for FieldRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegister")
            .field("live", &self.live)
            .field("pending", &self.pending)
            .field("schedule", &self.schedule)
            .field("window", &self.window)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
