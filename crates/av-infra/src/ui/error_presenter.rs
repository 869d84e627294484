use async_trait::async_trait;
use tracing::warn;

use av_core::ports::{ErrorPresenterPort, LocaleContext};
use av_core::verification::{ErrorMessage, ErrorTemplate};

/// Presenter for headless runs: writes the dialog to the log instead.
#[derive(Debug, Clone, Default)]
pub struct TracingErrorPresenter;

impl TracingErrorPresenter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ErrorPresenterPort for TracingErrorPresenter {
    async fn present_error(
        &self,
        template: ErrorTemplate,
        locale: &LocaleContext,
        message: ErrorMessage,
    ) -> anyhow::Result<()> {
        match message {
            ErrorMessage::Localizable(err) => warn!(
                ?template,
                locale = %locale.locale,
                message_id = %err.id,
                default_text = %err.default_message,
                "error dialog"
            ),
            ErrorMessage::Raw(text) => warn!(
                ?template,
                locale = %locale.locale,
                text = %text,
                "error dialog"
            ),
        }
        Ok(())
    }
}
