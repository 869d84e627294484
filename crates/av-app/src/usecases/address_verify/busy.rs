use std::sync::Arc;

use tokio::sync::watch;

/// Per-view "verification in flight" flag.
///
/// The flag can only be raised through [`BusyFlag::try_acquire`], and the
/// returned guard lowers it again when dropped, so every exit path of an
/// attempt (return, early error, panic unwinding, future dropped mid-await)
/// leaves the flag cleared.
#[derive(Debug, Clone)]
pub struct BusyFlag {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_busy(&self) -> bool {
        *self.tx.borrow()
    }

    /// Raise the flag unless it is already raised.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        let mut acquired = false;
        self.tx.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                acquired = true;
                true
            }
        });
        acquired.then(|| BusyGuard {
            tx: Arc::clone(&self.tx),
        })
    }

    /// Receiver observing every change of the flag. Dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Holds the busy flag raised; lowers it on drop.
#[derive(Debug)]
pub struct BusyGuard {
    tx: Arc<watch::Sender<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}
