//! Counting limiter for concurrent device sessions.
//!
//! std has no semaphore, and the only thing needed here is "at most N
//! harness calls in flight", so this is a minimal Mutex + Condvar
//! implementation rather than a new dependency.

use std::sync::{Condvar, Mutex};

/// Bounds the number of concurrently held permits.
pub(crate) struct SessionLimiter {
    available: Mutex<usize>,
    released: Condvar,
}

impl SessionLimiter {
    /// Limiter with `permits` slots. Zero is clamped to one; a limiter
    /// that can never be acquired would deadlock the sweep.
    pub fn new(permits: usize) -> Self {
        Self {
            available: Mutex::new(permits.max(1)),
            released: Condvar::new(),
        }
    }

    /// Block until a permit is free and take it.
    pub fn acquire(&self) -> SessionPermit<'_> {
        let mut available = self
            .available
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        while *available == 0 {
            available = self
                .released
                .wait(available)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
        *available -= 1;
        SessionPermit { limiter: self }
    }
}

/// Holds one session slot; returned to the limiter on drop.
pub(crate) struct SessionPermit<'a> {
    limiter: &'a SessionLimiter,
}

impl Drop for SessionPermit<'_> {
    fn drop(&mut self) {
        let mut available = self
            .limiter
            .available
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *available += 1;
        self.limiter.released.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn limiter_caps_concurrency() {
        let limiter = Arc::new(SessionLimiter::new(2));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                std::thread::spawn(move || {
                    let _permit = limiter.acquire();
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn zero_permits_is_clamped() {
        let limiter = SessionLimiter::new(0);
        let _permit = limiter.acquire();
    }
}
