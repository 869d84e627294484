use serde::{Deserialize, Serialize};

use crate::dialog::DialogStep;
use crate::hw::TransportKind;

/// Snapshot pushed to the UI whenever the dialog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDialogView {
    pub step: DialogStep,
    pub address: String,
    pub index: u32,
    /// Derivation path shown on the verify step, e.g. `m/1852'/1815'/0'/0/3`.
    pub path: String,
    pub transport: TransportKind,
    /// True while a device call is in flight; the UI disables its buttons.
    pub is_waiting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_serializes_step_by_name_for_the_frontend() {
        let view = AddressDialogView {
            step: DialogStep::AddressVerify,
            address: "addr1qxyexample".to_string(),
            index: 3,
            path: "m/1852'/1815'/0'/0/3".to_string(),
            transport: TransportKind::Serial,
            is_waiting: true,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["step"], "AddressVerify");
        assert_eq!(json["transport"], "Serial");
        assert_eq!(json["is_waiting"], true);
    }
}
