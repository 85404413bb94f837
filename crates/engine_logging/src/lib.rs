#![deny(missing_docs)]
//! Shared logging utilities for the formfill workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a thread-local frame scope that tags every message with the document
//! currently being scanned or filled, and a minimal test initializer for the
//! global logger.

use std::cell::RefCell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Label of the frame the current thread is working on, if any.
    static FRAME_SCOPE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Guard returned by [`enter_frame`]. Restores the previous frame label on drop.
#[must_use = "the frame scope ends when the guard is dropped"]
pub struct FrameScope {
    previous: Option<String>,
}

impl Drop for FrameScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        FRAME_SCOPE.with(|scope| *scope.borrow_mut() = previous);
    }
}

/// Marks the current thread as working on `label` until the guard is dropped.
///
/// Scopes nest: the innermost label wins and the outer one is restored when
/// the inner guard goes away.
pub fn enter_frame(label: impl Into<String>) -> FrameScope {
    let label = label.into();
    let previous = FRAME_SCOPE.with(|scope| scope.borrow_mut().replace(label));
    FrameScope { previous }
}

/// Returns the label of the frame the current thread is working on.
pub fn current_frame() -> Option<String> {
    FRAME_SCOPE.with(|scope| scope.borrow().clone())
}

/// Prefix prepended to every `engine_*` message: `"[frame] "` or nothing.
#[doc(hidden)]
pub fn frame_prefix() -> String {
    FRAME_SCOPE.with(|scope| match scope.borrow().as_deref() {
        Some(label) => format!("[{label}] "),
        None => String::new(),
    })
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::frame_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::frame_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::frame_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::frame_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::frame_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{current_frame, enter_frame, frame_prefix};

    #[test]
    fn no_scope_means_no_prefix() {
        assert_eq!(current_frame(), None);
        assert_eq!(frame_prefix(), "");
    }

    #[test]
    fn nested_scopes_restore_outer_label() {
        let outer = enter_frame("frame 0");
        assert_eq!(frame_prefix(), "[frame 0] ");
        {
            let _inner = enter_frame("frame 1");
            assert_eq!(current_frame().as_deref(), Some("frame 1"));
        }
        assert_eq!(current_frame().as_deref(), Some("frame 0"));
        drop(outer);
        assert_eq!(current_frame(), None);
    }
}
