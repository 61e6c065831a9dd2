use arkitecto::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ConfirmationPrompt that answers every prompt the same way and keeps the questions
#[derive(Clone)]
pub struct MockConfirmation {
    answer: bool,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockConfirmation {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            ..Self::accepting()
        }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ConfirmationPrompt for MockConfirmation {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}
