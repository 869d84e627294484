//! Address verification orchestrator.
//!
//! This module coordinates the address dialog state machine and its side
//! effects for a single address view.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use av_core::address::{format_path, AddressChain};
use av_core::dialog::{
    AddressDialogView, DialogAction, DialogEvent, DialogStateMachine, DialogStep,
    TransitionContext,
};
use av_core::ports::DialogEventPort;
use av_core::{
    AddressRecord, AppConfig, DeviceIdentity, DeviceIdentityStore, HardwareDeviceInfo,
    SerialDeviceHandle, SessionId, TransportKind, VerificationOutcome, WalletMeta,
    WirelessDeviceId,
};

use crate::usecases::address_verify::context::AddressVerifyContext;
use crate::usecases::address_verify::executor::{
    ExecutorError, VerificationExecutor, VerificationRequest,
};
use crate::usecases::address_verify::session::VerificationSession;

/// Errors produced by the address verification orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum AddressVerifyError {
    #[error("a verification attempt is already in flight")]
    VerificationInFlight,
    #[error("verification cannot start from step {0:?}")]
    InvalidStep(DialogStep),
    #[error("no active verification session")]
    NoActiveSession,
}

impl From<ExecutorError> for AddressVerifyError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::Busy => AddressVerifyError::VerificationInFlight,
        }
    }
}

/// Request prepared under the dispatch lock, run after releasing it.
struct PreparedAttempt {
    session_id: SessionId,
    request: VerificationRequest,
}

/// Orchestrator that drives the address dialog and its side effects.
///
/// One instance per address view. Identities are shared with every other
/// view of the wallet session through `identities`.
pub struct AddressVerifyOrchestrator {
    flow: Arc<DialogFlow>,
}

/// Everything a dispatch needs. Shared so a finish can outlive `verify`.
struct DialogFlow {
    context: Arc<AddressVerifyContext>,
    record: AddressRecord,
    wallet: WalletMeta,
    device: HardwareDeviceInfo,
    alt_transport_enabled: bool,
    identities: Arc<DeviceIdentityStore>,
    executor: Arc<VerificationExecutor>,
    dialog_events: Arc<dyn DialogEventPort>,
}

impl AddressVerifyOrchestrator {
    pub fn new(
        record: AddressRecord,
        wallet: WalletMeta,
        device: HardwareDeviceInfo,
        config: &AppConfig,
        identities: Arc<DeviceIdentityStore>,
        executor: Arc<VerificationExecutor>,
        dialog_events: Arc<dyn DialogEventPort>,
    ) -> Self {
        Self {
            flow: Arc::new(DialogFlow {
                context: AddressVerifyContext::new().arc(),
                record,
                wallet,
                device,
                alt_transport_enabled: config.alt_transport_enabled(),
                identities,
                executor,
                dialog_events,
            }),
        }
    }

    pub async fn open_details(&self) -> DialogStep {
        self.flow.dispatch(DialogEvent::OpenDetails).await
    }

    /// "Verify address" on the details dialog.
    pub async fn request_verify(&self) -> DialogStep {
        self.flow.dispatch(DialogEvent::RequestVerify).await
    }

    pub async fn choose_transport(&self, transport: TransportKind) -> DialogStep {
        self.flow
            .dispatch(DialogEvent::ChooseTransport { transport })
            .await
    }

    /// Serial pairing UI reports an attached device.
    pub async fn on_serial_connected(&self, handle: SerialDeviceHandle) -> DialogStep {
        self.device_connected(DeviceIdentity::Serial(handle)).await
    }

    /// Wireless pairing UI reports a connected device.
    pub async fn on_wireless_connected(&self, id: WirelessDeviceId) -> DialogStep {
        self.device_connected(DeviceIdentity::Wireless(id)).await
    }

    pub async fn close(&self) -> DialogStep {
        self.flow.dispatch(DialogEvent::Close).await
    }

    /// Confirm on the verify dialog: run one attempt, then close the dialog.
    ///
    /// The dialog is closed whatever the outcome, also when the driver panics
    /// or this future is dropped mid-call. A request made while an attempt is
    /// in flight is rejected without contacting the device.
    pub async fn verify(&self) -> Result<VerificationOutcome, AddressVerifyError> {
        let flow = &self.flow;
        if flow.executor.is_busy() {
            warn!(address = %flow.record.address, "verify ignored, attempt already in flight");
            return Err(AddressVerifyError::VerificationInFlight);
        }

        let prepared = {
            let _dispatch_guard = flow.context.acquire_dispatch_lock().await;
            let (step, prepared) = flow.dispatch_locked(DialogEvent::ConfirmVerify).await?;
            prepared.ok_or(AddressVerifyError::InvalidStep(step))?
        };

        let PreparedAttempt {
            session_id,
            request,
        } = prepared;
        let attempt = flow.executor.begin(request)?;
        let finish = FinishGuard::arm(Arc::clone(flow), session_id);
        flow.emit_view().await;
        let outcome = attempt.run().await;

        finish.finish().await;
        Ok(outcome)
    }

    pub async fn current_step(&self) -> DialogStep {
        self.flow.context.step().await
    }

    pub fn is_busy(&self) -> bool {
        self.flow.executor.is_busy()
    }

    /// Live busy flag for the UI; dropping the receiver unsubscribes.
    pub fn busy_changes(&self) -> watch::Receiver<bool> {
        self.flow.executor.busy_flag().subscribe()
    }

    pub async fn view(&self) -> AddressDialogView {
        self.flow.view().await
    }

    async fn device_connected(&self, identity: DeviceIdentity) -> DialogStep {
        self.flow
            .dispatch(DialogEvent::DeviceConnected { identity })
            .await
    }
}

impl DialogFlow {
    async fn view(&self) -> AddressDialogView {
        let step = self.context.step().await;
        let transport = self
            .context
            .session()
            .await
            .map(|session| session.transport)
            .unwrap_or_default();
        AddressDialogView {
            step,
            address: self.record.address.clone(),
            index: self.record.index,
            path: format_path(
                0,
                AddressChain::External,
                self.record.index,
                self.wallet.implementation_id,
            ),
            transport,
            is_waiting: self.executor.is_busy(),
        }
    }

    async fn dispatch(&self, event: DialogEvent) -> DialogStep {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        match self.dispatch_locked(event).await {
            Ok((step, _)) => step,
            Err(err) => {
                warn!(error = %err, "address dialog action failed");
                self.context.step().await
            }
        }
    }

    /// Caller must hold the dispatch lock.
    async fn dispatch_locked(
        &self,
        event: DialogEvent,
    ) -> Result<(DialogStep, Option<PreparedAttempt>), AddressVerifyError> {
        let span = info_span!(
            "usecase.address_verify.dispatch",
            event = ?event,
            address = %self.record.address,
        );
        async {
            let from = self.context.step().await;
            let ctx = TransitionContext {
                alt_transport_enabled: self.alt_transport_enabled,
                identities: &self.identities,
            };
            let (next, actions) = DialogStateMachine::transition(from, event.clone(), &ctx);
            if from == next && actions.is_empty() {
                debug!(step = ?from, event = ?event, "address dialog event ignored");
                return Ok((from, None));
            }
            info!(from = ?from, to = ?next, event = ?event, "address dialog transition");

            let prepared = self.execute_actions(actions).await?;
            self.context.set_step(next).await;
            self.emit_view().await;
            Ok((next, prepared))
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<DialogAction>,
    ) -> Result<Option<PreparedAttempt>, AddressVerifyError> {
        let mut prepared = None;
        for action in actions {
            debug!(?action, "address dialog executing action");
            match action {
                DialogAction::BeginSession => {
                    let session = VerificationSession::begin();
                    debug!(session_id = %session.id, "verification session started");
                    if let Some(previous) = self.context.replace_session(Some(session)).await {
                        warn!(session_id = %previous.id, "replacing a session that never closed");
                        previous.end();
                    }
                }
                DialogAction::SelectTransport { transport } => {
                    let updated = self
                        .context
                        .update_session(|session| session.transport = transport)
                        .await;
                    if !updated {
                        return Err(AddressVerifyError::NoActiveSession);
                    }
                }
                DialogAction::RememberIdentity { identity } => {
                    // Written before the step changes so the verify step sees it.
                    self.identities.set(identity);
                }
                DialogAction::RunVerification => {
                    prepared = Some(self.prepare_attempt().await?);
                }
                DialogAction::EndSession => {
                    if let Some(session) = self.context.replace_session(None).await {
                        debug!(session_id = %session.id, "verification session ended");
                        session.end();
                    }
                }
            }
        }
        Ok(prepared)
    }

    async fn prepare_attempt(&self) -> Result<PreparedAttempt, AddressVerifyError> {
        let session = self
            .context
            .session()
            .await
            .ok_or(AddressVerifyError::NoActiveSession)?;
        Ok(PreparedAttempt {
            session_id: session.id.clone(),
            request: VerificationRequest {
                address: self.record.address.clone(),
                index: self.record.index,
                wallet: self.wallet.clone(),
                device: self.device.with_identities(&self.identities),
                transport: session.transport,
                token: session.token,
            },
        })
    }

    /// Close the dialog for `session_id`, unless it was closed meanwhile.
    async fn finish_attempt(&self, session_id: &SessionId) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let current = self.context.session().await.map(|session| session.id);
        if current.as_ref() != Some(session_id) {
            info!(
                session_id = %session_id,
                "verification finished after its dialog closed, result discarded"
            );
            // Busy went down with the attempt; let the UI re-enable buttons.
            self.emit_view().await;
            return;
        }
        if let Err(err) = self
            .dispatch_locked(DialogEvent::VerificationFinished)
            .await
        {
            warn!(error = %err, "failed to close address dialog after verification");
        }
    }

    async fn emit_view(&self) {
        let view = self.view().await;
        self.dialog_events.emit_dialog_changed(view).await;
    }
}

/// Closes the dialog of an attempt that never reached [`FinishGuard::finish`].
///
/// Dropped while armed (the `verify` future was dropped, or something
/// unwound through it), it hands the finish to the runtime.
struct FinishGuard {
    flow: Option<Arc<DialogFlow>>,
    session_id: SessionId,
}

impl FinishGuard {
    fn arm(flow: Arc<DialogFlow>, session_id: SessionId) -> Self {
        Self {
            flow: Some(flow),
            session_id,
        }
    }

    async fn finish(mut self) {
        if let Some(flow) = &self.flow {
            flow.finish_attempt(&self.session_id).await;
        }
        self.flow = None;
    }
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let Some(flow) = self.flow.take() else {
            return;
        };
        let session_id = self.session_id.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                warn!(session_id = %session_id, "verification interrupted, closing dialog");
                runtime.spawn(async move {
                    flow.finish_attempt(&session_id).await;
                });
            }
            Err(_) => {
                warn!(
                    session_id = %session_id,
                    "verification interrupted outside a runtime, dialog left open"
                );
            }
        }
    }
}
