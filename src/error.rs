use core::fmt;

/// Errors reported by the fade controller.
///
/// Bus failures are never reported here: they are absorbed by the
/// transmission rounds and only show up as a fade that does not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeError {
    /// The controller was used before `init`
    NotInitialized,
    /// Malformed input from outside the controller
    InvalidArgument,
}

impl fmt::Display for FadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => f.write_str("fade controller is not initialized"),
            Self::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}
