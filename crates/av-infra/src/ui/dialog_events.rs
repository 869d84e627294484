use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::trace;

use av_core::dialog::AddressDialogView;
use av_core::ports::DialogEventPort;

const CHANNEL_CAPACITY: usize = 64;

/// Fans dialog snapshots out to any number of subscribers.
///
/// Subscribing returns a receiver; dropping it unsubscribes. Snapshots
/// emitted while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastDialogEvents {
    tx: broadcast::Sender<AddressDialogView>,
}

impl Default for BroadcastDialogEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastDialogEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AddressDialogView> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl DialogEventPort for BroadcastDialogEvents {
    async fn emit_dialog_changed(&self, view: AddressDialogView) {
        if self.tx.send(view).is_err() {
            trace!("dialog change emitted with no subscribers");
        }
    }
}
