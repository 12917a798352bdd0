/// Trailing-edge debounce over a caller-supplied clock (epoch ms).
///
/// Every signal replaces the pending deadline instead of queuing a new one,
/// so continuous activity defers firing indefinitely and a single fire
/// happens once input quiesces for the wait interval. Time is explicit, so
/// the single-threaded core stays deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    wait_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn signal(&mut self, now: u64) {
        self.deadline = Some(now + self.wait_ms);
    }

    /// True exactly once per quiet period, when the deadline has passed.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_quiet_interval() {
        let mut d = Debouncer::new(100);
        d.signal(0);

        assert!(!d.fire(99));
        assert!(d.fire(100));
        assert!(!d.fire(200), "deadline is consumed by firing");
    }

    #[test]
    fn new_signal_resets_deadline() {
        let mut d = Debouncer::new(100);
        d.signal(0);
        d.signal(80);

        assert!(!d.fire(100));
        assert!(d.fire(180));
    }

    #[test]
    fn never_fires_without_signal() {
        let mut d = Debouncer::new(100);
        assert!(!d.pending());
        assert!(!d.fire(u64::MAX));
    }
}
