//! Scripted prompt backend for driving wizards without a terminal
//!
//! [`ScriptedUi`] answers each prompt with the next [`WizardCommand`] of its
//! script and records what was shown, so tests can assert both the final
//! output and the sequence of steps presented.

use super::backend::{
    InputRequest, InputResponse, PickRequest, PickResponse, PromptUi, StepInfo,
};
use async_trait::async_trait;
use log::warn;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    /// Select the pick-list item with this label
    QuickPick(String),
    /// Type free text into a pick list that accepts custom input
    CustomInput(String),
    /// Answer an input box with this text
    InputBox(String),
    /// Back out of whatever prompt is shown
    Cancel,
}

impl WizardCommand {
    pub fn quick_pick(label: impl Into<String>) -> Self {
        Self::QuickPick(label.into())
    }

    pub fn custom_input(text: impl Into<String>) -> Self {
        Self::CustomInput(text.into())
    }

    pub fn input_box(text: impl Into<String>) -> Self {
        Self::InputBox(text.into())
    }
}

/// A prompt as it was presented to the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRecord {
    Pick {
        title: Option<String>,
        labels: Vec<String>,
        custom_input: bool,
        step: Option<StepInfo>,
    },
    Input {
        title: Option<String>,
        validation_message: Option<String>,
        step: Option<StepInfo>,
    },
}

impl PromptRecord {
    pub fn title(&self) -> Option<&str> {
        match self {
            PromptRecord::Pick { title, .. } | PromptRecord::Input { title, .. } => {
                title.as_deref()
            }
        }
    }

    pub fn step(&self) -> Option<StepInfo> {
        match self {
            PromptRecord::Pick { step, .. } | PromptRecord::Input { step, .. } => *step,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedUi {
    commands: Mutex<VecDeque<WizardCommand>>,
    transcript: Mutex<Vec<PromptRecord>>,
}

impl ScriptedUi {
    pub fn new(commands: impl IntoIterator<Item = WizardCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Number of commands not yet consumed
    pub fn remaining(&self) -> usize {
        self.commands.lock().len()
    }

    /// Every prompt presented so far, in order
    pub fn transcript(&self) -> Vec<PromptRecord> {
        self.transcript.lock().clone()
    }

    /// Titles of every prompt presented so far, in order
    pub fn titles(&self) -> Vec<String> {
        self.transcript
            .lock()
            .iter()
            .map(|record| record.title().unwrap_or_default().to_string())
            .collect()
    }

    fn next_command(&self) -> Option<WizardCommand> {
        let command = self.commands.lock().pop_front();
        if command.is_none() {
            warn!("Wizard script exhausted, cancelling prompt");
        }
        command
    }
}

#[async_trait]
impl PromptUi for ScriptedUi {
    async fn pick(&self, request: PickRequest) -> PickResponse {
        let labels: Vec<String> = request.items.iter().map(|item| item.label.clone()).collect();
        self.transcript.lock().push(PromptRecord::Pick {
            title: request.title.clone(),
            labels: labels.clone(),
            custom_input: request.custom_input,
            step: request.step,
        });

        match self.next_command() {
            Some(WizardCommand::QuickPick(label)) => {
                match labels.iter().position(|candidate| *candidate == label) {
                    Some(index) => PickResponse::Item(index),
                    None => {
                        warn!("No item labelled '{}' in {:?}", label, labels);
                        PickResponse::Cancelled
                    }
                }
            }
            Some(WizardCommand::CustomInput(text)) if request.custom_input => {
                PickResponse::Custom(text)
            }
            Some(WizardCommand::Cancel) | None => PickResponse::Cancelled,
            Some(other) => {
                warn!("Command {:?} does not answer a pick list", other);
                PickResponse::Cancelled
            }
        }
    }

    async fn input(&self, request: InputRequest) -> InputResponse {
        self.transcript.lock().push(PromptRecord::Input {
            title: request.title.clone(),
            validation_message: request.validation_message.clone(),
            step: request.step,
        });

        match self.next_command() {
            Some(WizardCommand::InputBox(text)) => InputResponse::Text(text),
            Some(WizardCommand::Cancel) | None => InputResponse::Cancelled,
            Some(other) => {
                warn!("Command {:?} does not answer an input box", other);
                InputResponse::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::backend::PickItemView;

    fn pick_request(labels: &[&str]) -> PickRequest {
        PickRequest {
            items: labels
                .iter()
                .map(|label| PickItemView {
                    label: label.to_string(),
                    description: None,
                    detail: None,
                })
                .collect(),
            ..PickRequest::default()
        }
    }

    #[tokio::test]
    async fn test_pick_by_label() {
        let ui = ScriptedUi::new(vec![WizardCommand::quick_pick("b")]);
        assert_eq!(ui.pick(pick_request(&["a", "b"])).await, PickResponse::Item(1));
        assert_eq!(ui.remaining(), 0);
    }

    #[tokio::test]
    async fn test_mismatched_command_cancels() {
        let ui = ScriptedUi::new(vec![
            WizardCommand::input_box("text"),
            WizardCommand::quick_pick("missing"),
            WizardCommand::custom_input("free"),
        ]);
        let request = pick_request(&["a"]);

        assert_eq!(ui.pick(request.clone()).await, PickResponse::Cancelled);
        assert_eq!(ui.pick(request.clone()).await, PickResponse::Cancelled);
        // custom input is only honoured when the list accepts it
        assert_eq!(ui.pick(request).await, PickResponse::Cancelled);
    }

    #[tokio::test]
    async fn test_exhausted_script_cancels() {
        let ui = ScriptedUi::new(Vec::new());
        assert_eq!(
            ui.input(InputRequest::default()).await,
            InputResponse::Cancelled
        );
        assert_eq!(ui.transcript().len(), 1);
    }
}
