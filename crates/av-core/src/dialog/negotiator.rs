//! Transport negotiation policy.
//!
//! Pure decision: which dialog step follows once the user asks to verify,
//! or once a transport has been chosen.

use serde::{Deserialize, Serialize};

use crate::hw::{DeviceIdentity, TransportKind};

/// Step the negotiator routes the dialog to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextStep {
    ChooseTransport,
    LedgerConnect,
    AddressVerify,
}

pub struct TransportNegotiator;

impl TransportNegotiator {
    /// Decide the next step.
    ///
    /// * `requested == None`: the user is still on the details dialog. The
    ///   transport picker is offered only when the alternate transport is
    ///   available; otherwise verification starts on the default link.
    /// * `requested == Some(kind)`: verification may start right away if an
    ///   identity for `kind` is already known, otherwise the device has to be
    ///   connected first. `known_identity` must be the identity stored for
    ///   `kind`; an identity for the other transport does not count.
    pub fn decide(
        platform_supports_alt: bool,
        requested: Option<TransportKind>,
        known_identity: Option<&DeviceIdentity>,
    ) -> NextStep {
        match requested {
            None if platform_supports_alt => NextStep::ChooseTransport,
            None => NextStep::AddressVerify,
            Some(kind) => match known_identity {
                Some(identity) if identity.kind() == kind => NextStep::AddressVerify,
                _ => NextStep::LedgerConnect,
            },
        }
    }
}
