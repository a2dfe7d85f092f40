//! Error types for agsim.
//!
//! Every failure in the forecasting pipeline maps to one variant of a single
//! `thiserror`-derived enum.  The [`ensure!`](crate::ensure) and
//! [`fail!`](crate::fail) macros build them at the point of violation.

use thiserror::Error;

/// The top-level error type used throughout agsim.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Too few historical observations to estimate anything.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A non-positive, non-finite, or otherwise malformed observation.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A simulation or analysis parameter outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A tail-risk computation with no outcome at or below the VaR.
    #[error("empty tail: {0}")]
    EmptyTail(String),

    /// Failure reading or writing an external file.
    #[error("i/o error: {0}")]
    Io(String),

    /// Failure parsing an external record.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Shorthand `Result` type used throughout agsim.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::$kind(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ag_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ag_core::errors::Result<f64> {
///     ensure!(x > 0.0, InvalidParameter, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$kind(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::$kind(...))` immediately.
///
/// # Example
/// ```
/// use ag_core::{fail, errors::Error};
/// fn always_err() -> ag_core::errors::Result<()> {
///     fail!(EmptyTail, "nothing below the threshold");
/// }
/// assert_eq!(
///     always_err(),
///     Err(Error::EmptyTail("nothing below the threshold".into()))
/// );
/// ```
#[macro_export]
macro_rules! fail {
    ($kind:ident, $($msg:tt)*) => {
        return Err($crate::errors::Error::$kind(format!($($msg)*)))
    };
}
