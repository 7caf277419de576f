// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::backtrace::BacktraceStatus;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::EnrichmentEntry;
use super::backtrace::Backtrace;
use super::source::Source;

/// Internal error data that is boxed to keep `OhnoCore` lightweight.
#[derive(Debug, Clone)]
pub struct Inner {
    pub(super) source: Source,
    pub(super) backtrace: Backtrace,
    pub(super) enrichment: Vec<EnrichmentEntry>,
}

/// Core error type that wraps source errors, captures backtraces, and holds enrichment entries.
///
/// `OhnoCore` is the foundation of the ohno error handling system. It can wrap any error
/// type while providing automatic backtrace capture and enrichment message stacking capabilities.
///
/// The internal error data is boxed to keep the `Err` variant in `Result` small. This minimizes
/// cases where the `Err` is larger than the `Ok` variant. If the error only contains a
/// `OhnoCore` field, the size of `Err` will be equivalent to that of a raw pointer.
///
/// # Examples
///
/// ```rust
/// use ohno::OhnoCore;
///
/// // Create from a string message
/// let core = OhnoCore::builder().error("something went wrong").build();
///
/// // Wrap an existing error
/// let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file.txt");
/// let wrapped = OhnoCore::builder().error(io_error).build();
/// ```
#[derive(Clone)]
pub struct OhnoCore {
    pub(super) data: Box<Inner>,
}

impl OhnoCore {
    pub(crate) fn from_builder(builder: crate::OhnoCoreBuilder) -> Self {
        Self {
            data: Box::new(Inner {
                source: builder.error,
                backtrace: match builder.backtrace_policy {
                    crate::BacktracePolicy::Auto => Backtrace::capture(),
                    crate::BacktracePolicy::Never => Backtrace::disabled(),
                    crate::BacktracePolicy::Forced => Backtrace::force_capture(),
                },
                enrichment: Vec::new(),
            }),
        }
    }

    /// Creates a new `OhnoCore` with no source. Automatically captures a backtrace.
    #[must_use]
    pub fn new() -> Self {
        Self::from_source(Source::None)
    }

    /// Creates a new [`OhnoCoreBuilder`](crate::OhnoCoreBuilder) for configuring an `OhnoCore` instance.
    #[must_use]
    pub fn builder() -> crate::OhnoCoreBuilder {
        crate::OhnoCoreBuilder::new()
    }

    fn from_source(source: Source) -> Self {
        Self {
            data: Box::new(Inner {
                source,
                backtrace: Backtrace::capture(),
                enrichment: Vec::new(),
            }),
        }
    }

    /// Returns the source error if this error wraps another error.
    #[must_use]
    pub fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.data.source {
            Source::Error(source) => Some(source.as_ref()),
            Source::Transparent(source) => source.source(),
            Source::None => None,
        }
    }

    /// Returns whether this error has a captured backtrace.
    #[must_use]
    pub fn has_backtrace(&self) -> bool {
        matches!(self.data.backtrace.status(), BacktraceStatus::Captured)
    }

    /// Returns a reference to the backtrace regardless of capture status.
    ///
    /// This method always returns a reference to the internal backtrace,
    /// even if it wasn't captured (in which case it will be empty/disabled).
    pub fn backtrace(&self) -> &std::backtrace::Backtrace {
        self.data.backtrace.as_backtrace()
    }

    /// Returns an iterator over the enrichment information in reverse order (most recent first).
    pub fn enrichments(&self) -> impl Iterator<Item = &EnrichmentEntry> {
        self.data.enrichment.iter().rev()
    }

    /// Returns an iterator over just the enrichment messages in reverse order (most recent first).
    pub fn enrichment_messages(&self) -> impl Iterator<Item = &str> {
        self.data.enrichment.iter().rev().map(|ctx| ctx.message.as_ref())
    }

    /// Formats the main error message without backtrace and error enrichment.
    #[must_use]
    pub fn format_message(&self, default_message: &str, override_message: Option<Cow<'_, str>>) -> String {
        MessageFormatter {
            core: self,
            default_message,
            override_message,
        }
        .to_string()
    }

    /// Formats the error with an optional custom message override.
    ///
    /// This method is used internally by the Display implementation and by
    /// derived Error types that want to override the main error message.
    ///
    /// # Errors
    ///
    /// This function returns a `fmt::Error` if writing to the formatter fails.
    pub fn format_error(&self, f: &mut fmt::Formatter<'_>, default_message: &str, override_message: Option<Cow<'_, str>>) -> fmt::Result {
        let m = MessageFormatter {
            core: self,
            default_message,
            override_message,
        };

        std::fmt::Display::fmt(&m, f)?;

        for ctx in &self.data.enrichment {
            write!(f, "\n> {ctx}")?;
        }

        if matches!(self.data.backtrace.status(), BacktraceStatus::Captured) {
            write!(f, "\n\nBacktrace:\n{}", self.data.backtrace.as_backtrace())?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for OhnoCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OhnoCore")
            .field("source", &self.data.source)
            .field("backtrace", &self.data.backtrace)
            .field("enrichment", &self.data.enrichment)
            .finish()
    }
}

impl fmt::Display for OhnoCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_error(f, "", None)
    }
}

impl Default for OhnoCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for formatting error messages in a consistent way.
struct MessageFormatter<'a> {
    core: &'a OhnoCore,
    default_message: &'a str,
    override_message: Option<Cow<'a, str>>,
}

impl fmt::Display for MessageFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CAUSED_BY: &str = "caused by:";

        let MessageFormatter {
            core,
            default_message,
            override_message,
        } = self;

        match (override_message, &core.data.source) {
            (Some(msg), Source::Transparent(source) | Source::Error(source)) => {
                write!(f, "{msg}\n{CAUSED_BY} {source}")
            }
            (Some(msg), Source::None) => write!(f, "{msg}"),
            (None, Source::Transparent(source) | Source::Error(source)) => write!(f, "{source}"),
            (None, Source::None) => write!(f, "{default_message}"),
        }
    }
}
