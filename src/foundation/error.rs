/// Convenience result type used across photostrip.
pub type PhotoStripResult<T> = Result<T, PhotoStripError>;

/// Top-level error taxonomy used by booth APIs.
///
/// Device and asset failures are distinct variants so a UI layer can present differentiated
/// messages. Nothing here is fatal to the process: every failure is scoped to the current
/// session and recoverable by restarting capture.
#[derive(thiserror::Error, Debug)]
pub enum PhotoStripError {
    /// Camera permission denied or no capture device present.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// The video source has not reported valid dimensions yet.
    #[error("frame not ready: source reports {width}x{height}")]
    FrameNotReady {
        /// Reported source width.
        width: u32,
        /// Reported source height.
        height: u32,
    },

    /// A decorative overlay image could not be loaded.
    #[error("asset load failed for '{name}': {reason}")]
    AssetLoad {
        /// Logical asset name.
        name: String,
        /// Underlying failure description.
        reason: String,
    },

    /// Composition was requested with the wrong number of stills.
    #[error("incomplete session: expected 4 stills, got {got}")]
    IncompleteSession {
        /// Number of stills actually supplied.
        got: usize,
    },

    /// A capture slot exhausted its not-ready retries and the run was discarded.
    #[error("capture aborted at photo {} after {attempts} attempts", .slot + 1)]
    CaptureAborted {
        /// Zero-based slot that failed.
        slot: usize,
        /// Consecutive failed attempts.
        attempts: u32,
    },

    /// Invalid configuration or illegal state transition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image encoding or decoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoStripError {
    /// Build a [`PhotoStripError::DeviceUnavailable`] value.
    pub fn device_unavailable(msg: impl Into<String>) -> Self {
        Self::DeviceUnavailable(msg.into())
    }

    /// Build a [`PhotoStripError::AssetLoad`] value.
    pub fn asset_load(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`PhotoStripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotoStripError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// `true` for conditions the sequencer absorbs as "try again on the next tick".
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FrameNotReady { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
