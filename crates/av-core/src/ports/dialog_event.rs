use async_trait::async_trait;

use crate::dialog::AddressDialogView;

/// Notifies the UI layer about dialog changes.
#[async_trait]
pub trait DialogEventPort: Send + Sync {
    async fn emit_dialog_changed(&self, view: AddressDialogView);
}
