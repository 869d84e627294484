//! Verification executor.
//!
//! Runs one verification attempt: busy guard, addressing lookup, device call,
//! failure classification and error presentation.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, info_span, warn, Instrument};

use av_core::ports::{AddressIndexPort, DeviceVerifierPort, ErrorPresenterPort, LocaleContext};
use av_core::verification::DeviceVerifyError;
use av_core::{HardwareDeviceInfo, TransportKind, VerificationOutcome, WalletMeta};

use crate::usecases::address_verify::busy::{BusyFlag, BusyGuard};
use crate::usecases::address_verify::session::AttemptToken;

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("a verification attempt is already in flight")]
    Busy,
}

/// Everything one attempt needs, captured when the user confirms.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub address: String,
    pub index: u32,
    pub wallet: WalletMeta,
    pub device: HardwareDeviceInfo,
    pub transport: TransportKind,
    pub token: AttemptToken,
}

/// Executes verification attempts for one address view.
pub struct VerificationExecutor {
    busy: BusyFlag,
    address_index: Arc<dyn AddressIndexPort>,
    verifier: Arc<dyn DeviceVerifierPort>,
    presenter: Arc<dyn ErrorPresenterPort>,
    locale: LocaleContext,
}

impl VerificationExecutor {
    pub fn new(
        address_index: Arc<dyn AddressIndexPort>,
        verifier: Arc<dyn DeviceVerifierPort>,
        presenter: Arc<dyn ErrorPresenterPort>,
        locale: LocaleContext,
    ) -> Self {
        Self {
            busy: BusyFlag::new(),
            address_index,
            verifier,
            presenter,
            locale,
        }
    }

    /// Use `busy` instead of a private flag, e.g. one the UI already watches.
    pub fn with_busy_flag(mut self, busy: BusyFlag) -> Self {
        self.busy = busy;
        self
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Raise the busy flag and hand back the attempt ready to run.
    ///
    /// Fails without touching the device if another attempt holds the flag.
    pub fn begin(&self, request: VerificationRequest) -> Result<PendingAttempt<'_>, ExecutorError> {
        let guard = self.busy.try_acquire().ok_or_else(|| {
            warn!(
                address = %request.address,
                "verification requested while another attempt is in flight"
            );
            ExecutorError::Busy
        })?;
        Ok(PendingAttempt {
            executor: self,
            request,
            _busy: guard,
        })
    }

    /// `begin` followed by `run`.
    pub async fn run(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationOutcome, ExecutorError> {
        Ok(self.begin(request)?.run().await)
    }

    async fn attempt(&self, request: &VerificationRequest) -> VerificationOutcome {
        if request.token.is_abandoned() {
            info!("dialog closed before the device was contacted, attempt skipped");
            return VerificationOutcome::Abandoned;
        }

        let Some(addressing) = self.address_index.addressing_info(&request.address) else {
            error!(
                address = %request.address,
                index = request.index,
                "no addressing data for an address offered by this wallet"
            );
            return VerificationOutcome::InvariantViolation {
                address: request.address.clone(),
            };
        };

        // A panicking driver is treated like any other thrown device error.
        let call = AssertUnwindSafe(async {
            self.verifier
                .verify_address(
                    request.wallet.implementation_id,
                    &request.address,
                    &addressing,
                    &request.device,
                    request.transport,
                )
                .await
        });
        let result = match call.catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!(%reason, "device verifier panicked");
                return VerificationOutcome::OpaqueFailure(reason);
            }
        };

        match result {
            Ok(()) => {
                info!("address confirmed on device");
                VerificationOutcome::Verified
            }
            Err(DeviceVerifyError::Localizable(err)) => {
                warn!(message_id = %err.id, "device verification failed");
                VerificationOutcome::DomainFailure(err)
            }
            Err(DeviceVerifyError::Opaque(err)) => {
                error!(error = ?err, "hardware wallet connection error");
                VerificationOutcome::OpaqueFailure(err.to_string())
            }
        }
    }

    async fn report(&self, request: &VerificationRequest, outcome: &VerificationOutcome) {
        let Some((template, message)) = outcome.error_dialog() else {
            return;
        };

        if request.token.is_abandoned() {
            info!(
                ?template,
                "dialog closed before the device answered, discarding result"
            );
            return;
        }

        if let Err(err) = self
            .presenter
            .present_error(template, &self.locale, message)
            .await
        {
            warn!(error = %err, ?template, "failed to present verification error");
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        (*reason).to_string()
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.clone()
    } else {
        "device verifier panicked".to_string()
    }
}

/// An attempt holding the busy flag. Running or dropping it lowers the flag.
pub struct PendingAttempt<'a> {
    executor: &'a VerificationExecutor,
    request: VerificationRequest,
    _busy: BusyGuard,
}

impl PendingAttempt<'_> {
    pub async fn run(self) -> VerificationOutcome {
        let span = info_span!(
            "usecase.address_verify.execute",
            address = %self.request.address,
            index = self.request.index,
            transport = %self.request.transport,
        );
        async {
            let outcome = self.executor.attempt(&self.request).await;
            self.executor.report(&self.request, &outcome).await;
            outcome
        }
        .instrument(span)
        .await
    }
}
