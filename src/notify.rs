//! User Notifications
//!
//! Transient messages and the progress indicator shown while a translation
//! is in flight.

use std::future::Future;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Progress indicator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOptions {
    pub title: String,
    pub cancellable: bool,
}

impl ProgressOptions {
    /// Indeterminate progress that cannot be aborted
    pub fn indeterminate(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cancellable: false,
        }
    }
}

/// Trait for surfaces that show messages to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn progress_started(&self, options: &ProgressOptions);

    fn progress_finished(&self, options: &ProgressOptions);

    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Closes the progress indicator when dropped, including during unwinding.
struct ProgressGuard<'a> {
    notifier: &'a dyn Notifier,
    options: ProgressOptions,
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.notifier.progress_finished(&self.options);
    }
}

/// Run `task` with a progress indicator shown for its whole duration.
pub async fn with_progress<F, T>(notifier: &dyn Notifier, options: ProgressOptions, task: F) -> T
where
    F: Future<Output = T>,
{
    notifier.progress_started(&options);
    let _guard = ProgressGuard { notifier, options };
    task.await
}

/// Writes notifications to stderr
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only errors and warnings reach stderr
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Info => {
                info!("ℹ️ {}", message);
                if !self.quiet {
                    eprintln!("{}", message);
                }
            }
            Level::Warning => {
                warn!("⚠️ {}", message);
                eprintln!("warning: {}", message);
            }
            Level::Error => {
                error!("❌ {}", message);
                eprintln!("error: {}", message);
            }
        }
    }

    fn progress_started(&self, options: &ProgressOptions) {
        info!("⏳ {} (cancellable: {})", options.title, options.cancellable);
        if !self.quiet {
            eprintln!("{}", options.title);
        }
    }

    fn progress_finished(&self, options: &ProgressOptions) {
        info!("⌛ {} finished", options.title);
    }
}
