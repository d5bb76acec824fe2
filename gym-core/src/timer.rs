//! One-shot deadline driven by caller-supplied timestamps.
//!
//! The core is cooperative and never blocks, so scheduled work is modelled
//! as an explicit deadline checked once per frame instead of a detached
//! timer. Carries a cancel handle even though the reference reconnect flow
//! never cancels.

#[derive(Clone, Copy, Debug, Default)]
pub struct OneShot {
    deadline_ms: Option<u64>,
}

impl OneShot {
    pub fn idle() -> Self {
        Self { deadline_ms: None }
    }

    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// True exactly once, on the first poll at or past the deadline.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
