//! Host collaborators a check needs besides the actor document

use crate::check::{CheckConfigs, CheckMessage};
use crate::error::RulesResult;

/// UI side of check resolution
pub trait CheckHost {
    /// Pre-roll dialog; `false` when the user closed it without confirming
    fn configure(&mut self, configs: &mut CheckConfigs) -> bool {
        let _ = configs;
        true
    }

    /// Publish a finished check
    fn create_message(&mut self, message: &CheckMessage) -> RulesResult<()>;

    /// User-facing warning
    fn warn(&mut self, message: &str);
}

/// Host that keeps everything it is handed
#[derive(Debug, Default)]
pub struct Recorder {
    pub messages: Vec<CheckMessage>,
    pub warnings: Vec<String>,
    /// Number of dialogs shown
    pub dialogs: usize,
    /// Close every dialog without confirming
    pub cancel_dialogs: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling() -> Self {
        Recorder {
            cancel_dialogs: true,
            ..Self::default()
        }
    }
}

impl CheckHost for Recorder {
    fn configure(&mut self, _configs: &mut CheckConfigs) -> bool {
        self.dialogs += 1;
        !self.cancel_dialogs
    }

    fn create_message(&mut self, message: &CheckMessage) -> RulesResult<()> {
        self.messages.push(message.clone());
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
