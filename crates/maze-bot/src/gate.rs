//! One-shot readiness signal from the presentation task.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A one-shot gate: closed until [`open`](Self::open) is called, then open
/// forever. Clones share the same gate.
#[derive(Clone, Debug, Default)]
pub struct ReadyGate {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate, waking every waiter.
    pub fn open(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// Block until the gate opens or `timeout` elapses. Returns whether the
    /// gate is open.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |open| !*open)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn closed_until_opened() {
        let gate = ReadyGate::new();
        assert!(!gate.wait_timeout(Duration::from_millis(5)));
        gate.open();
        assert!(gate.wait_timeout(Duration::ZERO));
        assert!(gate.clone().wait_timeout(Duration::ZERO));
    }

    #[test]
    fn wakes_waiter_on_another_thread() {
        let gate = ReadyGate::new();
        let waiter = {
            let gate = gate.clone();
            thread::spawn(move || gate.wait_timeout(Duration::from_secs(10)))
        };
        gate.open();
        assert!(waiter.join().unwrap());
    }
}
