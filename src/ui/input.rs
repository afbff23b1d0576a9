//! Free-text input prompter

use super::backend::{InputRequest, InputResponse, PromptUi, StepInfo};
use super::{PromptResult, Prompter};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

type Validator = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Create an input box prompter rendered by `ui`
pub fn create_input_box(ui: Arc<dyn PromptUi>) -> InputBoxPrompter {
    InputBoxPrompter {
        ui,
        title: None,
        placeholder: None,
        value: None,
        password: false,
        validator: None,
        step: None,
    }
}

pub struct InputBoxPrompter {
    ui: Arc<dyn PromptUi>,
    title: Option<String>,
    placeholder: Option<String>,
    value: Option<String>,
    password: bool,
    validator: Option<Validator>,
    step: Option<StepInfo>,
}

impl InputBoxPrompter {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Initial text of the box
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_password(mut self) -> Self {
        self.password = true;
        self
    }

    /// Reject input for which `validator` returns a message; the box is shown
    /// again with that message
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }
}

#[async_trait]
impl Prompter for InputBoxPrompter {
    type Output = String;

    async fn prompt(&mut self) -> PromptResult<String> {
        let mut request = InputRequest {
            title: self.title.clone(),
            placeholder: self.placeholder.clone(),
            value: self.value.clone(),
            password: self.password,
            validation_message: None,
            step: self.step,
        };

        loop {
            let text = match self.ui.input(request.clone()).await {
                InputResponse::Text(text) => text,
                InputResponse::Cancelled => return PromptResult::Cancelled,
            };

            match self.validator.as_ref().and_then(|validate| validate(&text)) {
                Some(message) => {
                    debug!("Input rejected: {}", message);
                    request.value = Some(text);
                    request.validation_message = Some(message);
                }
                None => return PromptResult::Answered(text),
            }
        }
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.step = Some(StepInfo { current, total });
    }
}
