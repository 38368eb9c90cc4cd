//! CodeTrans Library
//!
//! Sends a code selection to a remote Java/C# translation service and
//! replaces it with the reindented result.

pub mod client;
pub mod commands;
pub mod config;
pub mod core;
pub mod direction;
pub mod editor;
pub mod error;
pub mod handler;
pub mod notify;

pub use client::{TranslationClient, TranslationService};
pub use crate::core::reindent::{reindent, ReindentMode, Reindenter};
pub use direction::Direction;
pub use editor::{Editor, TextBuffer};
pub use error::{TransError, TransResult};
pub use handler::{CommandHandler, CommandOutcome};
pub use notify::{Level, Notifier, ProgressOptions};
