//! Command Handler
//!
//! Drives one translation command from selection to buffer edit:
//! `Idle → AwaitingSelection → InFlight → Applying → Idle`.
//! Every failure ends the invocation with a notification and leaves the
//! buffer untouched.

use crate::client::TranslationService;
use crate::direction::Direction;
use crate::editor::Editor;
use crate::error::{is_failure_marker, TransError, TransResult};
use crate::notify::{with_progress, Notifier, ProgressOptions};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const MSG_TRANSLATION_REJECTED: &str =
    "Translation failed or invalid. Original code unchanged.";
pub const MSG_SELECTION_LOST: &str = "No text selected to replace.";
pub const MSG_COMMAND_FAILED: &str = "Command failed to execute.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    AwaitingSelection,
    InFlight,
    Applying,
}

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Selection replaced with the translation
    Applied,
    NoActiveEditor,
    EmptySelection,
    /// Service failed or returned nothing usable
    TranslationFailed,
    /// Selection was gone by the time the result arrived
    SelectionLost,
    /// Anything else, reported generically
    Unexpected,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

pub struct CommandHandler {
    service: Arc<dyn TranslationService>,
    notifier: Arc<dyn Notifier>,
    state: HandlerState,
}

impl CommandHandler {
    pub fn new(service: Arc<dyn TranslationService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            state: HandlerState::Idle,
        }
    }

    pub fn state(&self) -> HandlerState {
        self.state
    }

    /// Run one command invocation. Never fails and never panics outward.
    pub async fn run(
        &mut self,
        direction: Direction,
        editor: Option<&mut dyn Editor>,
    ) -> CommandOutcome {
        info!("▶️ Command invoked: translate {}", direction);

        let result = AssertUnwindSafe(self.execute(direction, editor))
            .catch_unwind()
            .await;
        self.transition(HandlerState::Idle);

        let err = match result {
            Ok(Ok(outcome)) => {
                debug!("Command finished: {:?}", outcome);
                return outcome;
            }
            Ok(Err(e)) => e,
            Err(payload) => TransError::from_panic(payload.as_ref()),
        };
        error!("❌ Error in translate command: {}", err);
        self.notifier.error(&err.user_message());
        CommandOutcome::Unexpected
    }

    async fn execute(
        &mut self,
        direction: Direction,
        editor: Option<&mut dyn Editor>,
    ) -> TransResult<CommandOutcome> {
        let Some(editor) = editor else {
            self.notifier.error(&TransError::NoActiveEditor.to_string());
            return Ok(CommandOutcome::NoActiveEditor);
        };

        self.transition(HandlerState::AwaitingSelection);
        let selected = editor.selected_text();
        if selected.is_empty() {
            self.notifier.warn(&TransError::EmptySelection.to_string());
            return Ok(CommandOutcome::EmptySelection);
        }
        let range = editor.selection();

        self.transition(HandlerState::InFlight);
        let service = Arc::clone(&self.service);
        let notifier = Arc::clone(&self.notifier);
        let translated = with_progress(
            notifier.as_ref(),
            ProgressOptions::indeterminate(direction.progress_title()),
            async {
                match service.translate(direction, &selected).await {
                    Ok(code) => code,
                    Err(e) => {
                        warn!("❌ Translation error: {}", e);
                        notifier.error(&e.user_message());
                        e.marker()
                    }
                }
            },
        )
        .await;

        self.transition(HandlerState::Applying);
        if is_failure_marker(&translated) {
            debug!("Translation result is not valid: {}", translated);
            self.notifier.error(MSG_TRANSLATION_REJECTED);
            return Ok(CommandOutcome::TranslationFailed);
        }

        if editor.selection_is_empty() {
            self.notifier.error(MSG_SELECTION_LOST);
            return Ok(CommandOutcome::SelectionLost);
        }

        editor.replace_range(range, &translated)?;
        info!("✅ Translation applied ({} bytes)", translated.len());
        Ok(CommandOutcome::Applied)
    }

    fn transition(&mut self, next: HandlerState) {
        if self.state != next {
            debug!("Handler state: {:?} → {:?}", self.state, next);
            self.state = next;
        }
    }
}
