//! Cancellable frame requests and one-shot deferred actions
//!
//! Both are driven by the host passing in the current time, so nothing here
//! touches a clock directly.

/// Handle returned by `TimerQueue::schedule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    deadline: f64,
    payload: T,
}

/// One-shot timers carrying a payload
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `payload` once `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + delay.max(0.0),
            payload,
        });
        id
    }

    /// Returns true if the timer was still pending
    #[cfg(test)]
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every payload whose deadline is at or before `now`,
    /// earliest first (ties keep scheduling order)
    pub fn poll(&mut self, now: f64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = rest;

        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| p.payload).collect()
    }
}

/// Handle for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Single outstanding "run one tick next frame" request.
///
/// The host calls `take_due` once per frame and only ticks when it yields a
/// handle; the tick then requests the following frame itself.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    requested: Option<FrameHandle>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a tick on the next frame, replacing any earlier request
    pub fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requested = Some(handle);
        handle
    }

    pub fn cancel(&mut self) {
        self.requested = None;
    }

    #[cfg(test)]
    pub fn is_requested(&self) -> bool {
        self.requested.is_some()
    }

    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.requested.take()
    }
}
