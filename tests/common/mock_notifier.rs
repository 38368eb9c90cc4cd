//! Mock Notifier for Testing
//!
//! Records every message and progress event for verification.

use codetrans::notify::{Level, Notifier, ProgressOptions};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(Level, String),
    ProgressStarted(ProgressOptions),
    ProgressFinished(String),
}

/// Notifier that keeps everything it is told
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Messages at `level`, in order
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(l, m) if l == level => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<ProgressOptions> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ProgressStarted(o) => Some(o),
                _ => None,
            })
            .collect()
    }

    pub fn has_message_containing(&self, text: &str) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, Event::Message(_, m) if m.contains(text)))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Message(level, message.to_string()));
    }

    fn progress_started(&self, options: &ProgressOptions) {
        self.events
            .lock()
            .unwrap()
            .push(Event::ProgressStarted(options.clone()));
    }

    fn progress_finished(&self, options: &ProgressOptions) {
        self.events
            .lock()
            .unwrap()
            .push(Event::ProgressFinished(options.title.clone()));
    }
}
