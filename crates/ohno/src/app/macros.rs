// Copyright (c) Microsoft Corporation.

//! Macros for the `app` module.

/// Construct an `Error` in place.
///
/// This macro provides a convenient way to create an `Error` without explicitly
/// calling `Error::new()`. It's similar to `anyhow::anyhow!`.
///
/// The macro accepts:
/// - A string literal: `app_err!("error message")`
/// - An error expression: `app_err!(MyError::SomeVariant)`
/// - A format string with arguments: `app_err!("error: {}", value)`
///
/// # Examples
///
/// ```rust
/// use ohno::app::AppError;
/// use ohno::app_err;
///
/// // Create an error from a string literal
/// let error: AppError = app_err!("something went wrong");
/// ```
///
/// ```rust
/// use ohno::{app_err, bail};
///
/// fn validate(x: i32) -> Result<(), ohno::AppError> {
///     if x < 0 {
///         return Err(app_err!("value must be non-negative, got {}", x));
///     }
///     Ok(())
/// }
/// ```
///
/// Creating an error from another error type:
///
/// ```rust
/// use ohno::{app_err, bail};
///
/// fn read_file() -> Result<String, ohno::app::AppError> {
///     std::fs::read_to_string("file.txt")
///         .map_err(|e| app_err!(e))
/// }
/// ```
///
/// Using with format arguments:
///
/// ```rust
/// use ohno::{app_err, bail};
///
/// let user_id = 42;
/// let error = app_err!("failed to process user {}", user_id);
/// assert!(error.to_string().starts_with("failed to process user 42"));
/// ```
#[macro_export]
macro_rules! app_err {
    ($msg:literal $(,)?) => {
        $crate::app::AppError::new(format!($msg))
    };
    ($err:ident $(,)?) => {
        $crate::app::AppError::new($err)
    };
    ($err:expr $(,)?) => {
        $crate::app::AppError::new($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::app::AppError::new(format!($fmt, $($arg)*))
    };
}
