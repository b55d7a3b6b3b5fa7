use thiserror::Error;

/// Configuration errors rejected by the spinner's setters.
///
/// Lifecycle calls (`start`, `stop`, `update_message`, `is_running`) never
/// fail; only configuration that would break the render loop is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinnerError {
    /// A frame set must contain at least one frame.
    #[error("frame set must contain at least one frame")]
    EmptyFrameSet,

    /// The tick interval must be longer than zero.
    #[error("spinner interval must be greater than zero")]
    ZeroInterval,
}
