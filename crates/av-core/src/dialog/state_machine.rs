//! Address dialog state machine.
//!
//! Defines a pure state transition function for the address verification
//! dialog. Side effects are returned as actions for the orchestrator.

use serde::{Deserialize, Serialize};

use crate::dialog::negotiator::{NextStep, TransportNegotiator};
use crate::hw::{DeviceIdentity, DeviceIdentityStore, TransportKind};

/// Address dialog step.
///
/// 地址对话框步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogStep {
    /// No dialog is shown.
    ///
    /// 无对话框。
    Closed,
    /// Address details with the "verify" button.
    ///
    /// 地址详情页。
    AddressDetails,
    /// Wireless / serial transport picker.
    ///
    /// 传输方式选择页。
    ChooseTransport,
    /// Pair or plug in the device for the chosen transport.
    ///
    /// 设备连接页。
    LedgerConnect,
    /// Derivation path and confirm button; the device call runs from here.
    ///
    /// 地址验证页。
    AddressVerify,
}

impl Default for DialogStep {
    fn default() -> Self {
        DialogStep::Closed
    }
}

impl From<NextStep> for DialogStep {
    fn from(next: NextStep) -> Self {
        match next {
            NextStep::ChooseTransport => DialogStep::ChooseTransport,
            NextStep::LedgerConnect => DialogStep::LedgerConnect,
            NextStep::AddressVerify => DialogStep::AddressVerify,
        }
    }
}

/// Events that drive the dialog.
///
/// 驱动对话框的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogEvent {
    /// User taps the address row.
    OpenDetails,
    /// User asks to verify the address on the device.
    RequestVerify,
    /// User picks a transport on the picker.
    ChooseTransport { transport: TransportKind },
    /// Pairing UI reports a connected device (either transport).
    DeviceConnected { identity: DeviceIdentity },
    /// User confirms on the verify dialog.
    ConfirmVerify,
    /// Verification attempt ended, whatever the outcome.
    VerificationFinished,
    /// User dismisses whatever is shown.
    Close,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogAction {
    /// Create the verification session for this view.
    BeginSession,
    /// Record the transport chosen for this session.
    SelectTransport { transport: TransportKind },
    /// Remember the identity of the device that just connected.
    RememberIdentity { identity: DeviceIdentity },
    /// Run one verification attempt on the device.
    RunVerification,
    /// Discard the session; abandon any attempt still in flight.
    EndSession,
}

/// Inputs the negotiator needs, borrowed for the duration of one transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub alt_transport_enabled: bool,
    pub identities: &'a DeviceIdentityStore,
}

/// Pure dialog state machine.
///
/// 纯状态机：不包含副作用。Illegal events leave the step unchanged.
pub struct DialogStateMachine;

impl DialogStateMachine {
    pub fn transition(
        step: DialogStep,
        event: DialogEvent,
        ctx: &TransitionContext<'_>,
    ) -> (DialogStep, Vec<DialogAction>) {
        match (step, event) {
            (DialogStep::Closed, DialogEvent::Close) => (DialogStep::Closed, Vec::new()),
            (_, DialogEvent::Close) => (DialogStep::Closed, vec![DialogAction::EndSession]),
            (DialogStep::Closed, DialogEvent::OpenDetails) => {
                (DialogStep::AddressDetails, vec![DialogAction::BeginSession])
            }
            (DialogStep::AddressDetails, DialogEvent::RequestVerify) => {
                let next = TransportNegotiator::decide(ctx.alt_transport_enabled, None, None);
                (next.into(), Vec::new())
            }
            (DialogStep::ChooseTransport, DialogEvent::ChooseTransport { transport }) => {
                let known = ctx.identities.get(transport);
                let next = TransportNegotiator::decide(
                    ctx.alt_transport_enabled,
                    Some(transport),
                    known.as_ref(),
                );
                (
                    next.into(),
                    vec![DialogAction::SelectTransport { transport }],
                )
            }
            (DialogStep::LedgerConnect, DialogEvent::DeviceConnected { identity }) => (
                DialogStep::AddressVerify,
                vec![DialogAction::RememberIdentity { identity }],
            ),
            (DialogStep::AddressVerify, DialogEvent::ConfirmVerify) => {
                (DialogStep::AddressVerify, vec![DialogAction::RunVerification])
            }
            (DialogStep::AddressVerify, DialogEvent::VerificationFinished) => {
                (DialogStep::Closed, vec![DialogAction::EndSession])
            }
            (step, _event) => (step, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{SerialDeviceHandle, WirelessDeviceId};

    const ALL_STEPS: [DialogStep; 5] = [
        DialogStep::Closed,
        DialogStep::AddressDetails,
        DialogStep::ChooseTransport,
        DialogStep::LedgerConnect,
        DialogStep::AddressVerify,
    ];

    fn ctx(alt: bool, identities: &DeviceIdentityStore) -> TransitionContext<'_> {
        TransitionContext {
            alt_transport_enabled: alt,
            identities,
        }
    }

    #[test]
    fn dialog_state_machine_close_from_every_step_yields_closed() {
        let identities = DeviceIdentityStore::new();
        for step in ALL_STEPS {
            let (next, _) = DialogStateMachine::transition(
                step,
                DialogEvent::Close,
                &ctx(true, &identities),
            );
            assert_eq!(next, DialogStep::Closed, "close from {step:?}");
        }
    }

    #[test]
    fn dialog_state_machine_close_when_closed_has_no_actions() {
        let identities = DeviceIdentityStore::new();
        let (next, actions) = DialogStateMachine::transition(
            DialogStep::Closed,
            DialogEvent::Close,
            &ctx(false, &identities),
        );
        assert_eq!(next, DialogStep::Closed);
        assert!(actions.is_empty());
    }

    #[test]
    fn dialog_state_machine_open_details_begins_session() {
        let identities = DeviceIdentityStore::new();
        let (next, actions) = DialogStateMachine::transition(
            DialogStep::Closed,
            DialogEvent::OpenDetails,
            &ctx(false, &identities),
        );
        assert_eq!(next, DialogStep::AddressDetails);
        assert_eq!(actions, vec![DialogAction::BeginSession]);
    }

    #[test]
    fn dialog_state_machine_request_verify_without_capability_goes_straight_to_verify() {
        let identities = DeviceIdentityStore::new();
        let (next, actions) = DialogStateMachine::transition(
            DialogStep::AddressDetails,
            DialogEvent::RequestVerify,
            &ctx(false, &identities),
        );
        assert_eq!(next, DialogStep::AddressVerify);
        assert!(actions.is_empty());
    }

    #[test]
    fn dialog_state_machine_request_verify_with_capability_offers_picker() {
        let identities = DeviceIdentityStore::new();
        let (next, _) = DialogStateMachine::transition(
            DialogStep::AddressDetails,
            DialogEvent::RequestVerify,
            &ctx(true, &identities),
        );
        assert_eq!(next, DialogStep::ChooseTransport);
    }

    #[test]
    fn dialog_state_machine_known_serial_handle_skips_connect() {
        let identities = DeviceIdentityStore::new();
        identities.set_serial(SerialDeviceHandle::from("usb-0"));
        let (next, actions) = DialogStateMachine::transition(
            DialogStep::ChooseTransport,
            DialogEvent::ChooseTransport {
                transport: TransportKind::Serial,
            },
            &ctx(true, &identities),
        );
        assert_eq!(next, DialogStep::AddressVerify);
        assert_eq!(
            actions,
            vec![DialogAction::SelectTransport {
                transport: TransportKind::Serial
            }]
        );
    }

    #[test]
    fn dialog_state_machine_unknown_wireless_id_requires_connect() {
        let identities = DeviceIdentityStore::new();
        identities.set_serial(SerialDeviceHandle::from("usb-0"));
        let (next, _) = DialogStateMachine::transition(
            DialogStep::ChooseTransport,
            DialogEvent::ChooseTransport {
                transport: TransportKind::Wireless,
            },
            &ctx(true, &identities),
        );
        assert_eq!(next, DialogStep::LedgerConnect);
    }

    #[test]
    fn dialog_state_machine_device_connected_on_either_transport_reaches_verify() {
        let identities = DeviceIdentityStore::new();
        for identity in [
            DeviceIdentity::Wireless(WirelessDeviceId::from("ble-0")),
            DeviceIdentity::Serial(SerialDeviceHandle::from("usb-0")),
        ] {
            let (next, actions) = DialogStateMachine::transition(
                DialogStep::LedgerConnect,
                DialogEvent::DeviceConnected {
                    identity: identity.clone(),
                },
                &ctx(true, &identities),
            );
            assert_eq!(next, DialogStep::AddressVerify);
            assert_eq!(actions, vec![DialogAction::RememberIdentity { identity }]);
        }
        // The store itself is only written by the orchestrator.
        assert!(!identities.is_known(TransportKind::Wireless));
    }

    #[test]
    fn dialog_state_machine_confirm_runs_verification_and_finish_closes() {
        let identities = DeviceIdentityStore::new();
        let (next, actions) = DialogStateMachine::transition(
            DialogStep::AddressVerify,
            DialogEvent::ConfirmVerify,
            &ctx(false, &identities),
        );
        assert_eq!(next, DialogStep::AddressVerify);
        assert_eq!(actions, vec![DialogAction::RunVerification]);

        let (next, actions) = DialogStateMachine::transition(
            next,
            DialogEvent::VerificationFinished,
            &ctx(false, &identities),
        );
        assert_eq!(next, DialogStep::Closed);
        assert_eq!(actions, vec![DialogAction::EndSession]);
    }

    #[test]
    fn dialog_state_machine_illegal_events_are_ignored() {
        let identities = DeviceIdentityStore::new();
        let ctx = ctx(true, &identities);
        let illegal = [
            (DialogStep::Closed, DialogEvent::RequestVerify),
            (DialogStep::Closed, DialogEvent::ConfirmVerify),
            (DialogStep::Closed, DialogEvent::VerificationFinished),
            (DialogStep::AddressDetails, DialogEvent::OpenDetails),
            (DialogStep::AddressDetails, DialogEvent::ConfirmVerify),
            (
                DialogStep::AddressDetails,
                DialogEvent::DeviceConnected {
                    identity: DeviceIdentity::Wireless(WirelessDeviceId::from("ble-0")),
                },
            ),
            (
                DialogStep::AddressVerify,
                DialogEvent::DeviceConnected {
                    identity: DeviceIdentity::Serial(SerialDeviceHandle::from("usb-0")),
                },
            ),
            (DialogStep::ChooseTransport, DialogEvent::RequestVerify),
            (DialogStep::LedgerConnect, DialogEvent::ConfirmVerify),
            (
                DialogStep::AddressVerify,
                DialogEvent::ChooseTransport {
                    transport: TransportKind::Serial,
                },
            ),
        ];
        for (step, event) in illegal {
            let (next, actions) = DialogStateMachine::transition(step, event.clone(), &ctx);
            assert_eq!(next, step, "{event:?} from {step:?}");
            assert!(actions.is_empty(), "{event:?} from {step:?}");
        }
    }

    #[test]
    fn dialog_state_machine_is_reusable_after_closing() {
        let identities = DeviceIdentityStore::new();
        let ctx = ctx(false, &identities);
        let mut step = DialogStep::Closed;
        for _ in 0..2 {
            for event in [
                DialogEvent::OpenDetails,
                DialogEvent::RequestVerify,
                DialogEvent::ConfirmVerify,
                DialogEvent::VerificationFinished,
            ] {
                step = DialogStateMachine::transition(step, event, &ctx).0;
            }
            assert_eq!(step, DialogStep::Closed);
        }
    }
}
