//! Prompt abstractions for interactive wizards
//!
//! A [`Prompter`] presents a single step and resolves to either an answer or a
//! cancellation. Concrete prompters ([`QuickPickPrompter`], [`InputBoxPrompter`])
//! describe what to ask and delegate the actual rendering to a [`PromptUi`]
//! backend: [`TerminalUi`] for interactive use, [`ScriptedUi`] for tests.

mod backend;
pub mod input;
pub mod picker;
mod render;
pub mod terminal;
pub mod testing;

use async_trait::async_trait;

pub use backend::{
    InputRequest, InputResponse, PickItemView, PickRequest, PickResponse, PromptUi, StepInfo,
};
pub use input::{create_input_box, InputBoxPrompter};
pub use picker::{create_quick_pick, DataQuickPickItem, QuickPickPrompter};
pub use render::{display_step_header, wizard_render_config};
pub use terminal::TerminalUi;
pub use testing::{PromptRecord, ScriptedUi, WizardCommand};

/// Outcome of presenting a single prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    /// User supplied a value
    Answered(T),
    /// User backed out of the step
    Cancelled,
}

impl<T> PromptResult<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PromptResult::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptResult<U> {
        match self {
            PromptResult::Answered(value) => PromptResult::Answered(f(value)),
            PromptResult::Cancelled => PromptResult::Cancelled,
        }
    }

    pub fn answered(self) -> Option<T> {
        match self {
            PromptResult::Answered(value) => Some(value),
            PromptResult::Cancelled => None,
        }
    }
}

/// A single interactive step producing a value of type `Output`
///
/// Each call to [`Prompter::prompt`] presents the step once and resolves once.
/// The wizard builds a fresh prompter for every presentation.
#[async_trait]
pub trait Prompter: Send {
    type Output: Send;

    /// Present the step and wait for an answer or a cancellation
    async fn prompt(&mut self) -> PromptResult<Self::Output>;

    /// Position of this step within the wizard, for display purposes
    fn set_steps(&mut self, _current: usize, _total: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_result_map() {
        let answered = PromptResult::Answered("42").map(|v| v.parse::<u32>().unwrap());
        assert_eq!(answered, PromptResult::Answered(42));

        let cancelled: PromptResult<&str> = PromptResult::Cancelled;
        assert!(cancelled.clone().map(str::len).is_cancelled());
        assert_eq!(cancelled.answered(), None);
    }
}
