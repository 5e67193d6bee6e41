//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use route53_shift_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The control plane could not be reached or rejected the request
    #[error("Transport error: {0}")]
    Transport(ProviderError),

    /// Credentials or permissions were rejected; aborts the whole run
    #[error("Authorization error: {0}")]
    Authorization(ProviderError),

    /// Malformed input (negative weight, empty DNS name, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        if err.is_authorization() {
            Self::Authorization(err)
        } else {
            Self::Transport(err)
        }
    }
}

impl CoreError {
    /// Whether the error must stop every remaining work item of the run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidArgument(_) | Self::Config(_) => true,
            Self::Transport(e) | Self::Authorization(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
