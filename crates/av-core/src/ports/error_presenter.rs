use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::verification::{ErrorMessage, ErrorTemplate};

/// Locale the presenter should render with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleContext {
    pub locale: String,
}

impl LocaleContext {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

/// Localized error dialog renderer.
#[async_trait]
pub trait ErrorPresenterPort: Send + Sync {
    async fn present_error(
        &self,
        template: ErrorTemplate,
        locale: &LocaleContext,
        message: ErrorMessage,
    ) -> Result<()>;
}
