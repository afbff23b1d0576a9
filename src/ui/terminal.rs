//! Interactive terminal backend built on `inquire`

use super::backend::{
    InputRequest, InputResponse, PickItemView, PickRequest, PickResponse, PromptUi,
};
use super::render::{display_step_header, wizard_render_config};
use async_trait::async_trait;
use colored::Colorize;
use inquire::{InquireError, Password, Select, Text};
use log::error;

const CUSTOM_INPUT_LABEL: &str = "✎ Enter a custom value…";
const DEFAULT_PAGE_SIZE: usize = 7;

/// Renders prompts in the terminal. Esc backs out of a step.
#[derive(Debug, Clone)]
pub struct TerminalUi {
    page_size: usize,
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TerminalUi {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl PromptUi for TerminalUi {
    async fn pick(&self, request: PickRequest) -> PickResponse {
        let page_size = self.page_size;
        match tokio::task::spawn_blocking(move || pick_blocking(request, page_size)).await {
            Ok(response) => response,
            Err(e) => {
                error!("Pick prompt task failed: {}", e);
                PickResponse::Cancelled
            }
        }
    }

    async fn input(&self, request: InputRequest) -> InputResponse {
        match tokio::task::spawn_blocking(move || input_blocking(request)).await {
            Ok(response) => response,
            Err(e) => {
                error!("Input prompt task failed: {}", e);
                InputResponse::Cancelled
            }
        }
    }
}

fn format_option(item: &PickItemView) -> String {
    let mut option = item.label.cyan().to_string();
    if let Some(description) = &item.description {
        option.push_str(&format!("  {}", description.dimmed()));
    }
    if let Some(detail) = &item.detail {
        option.push_str(&format!("  {}", detail.dimmed()));
    }
    option
}

fn pick_blocking(request: PickRequest, page_size: usize) -> PickResponse {
    let title = request.title.as_deref().unwrap_or("Select an option");
    display_step_header(request.step, title, request.placeholder.as_deref());

    let mut options: Vec<String> = request.items.iter().map(format_option).collect();
    if request.custom_input {
        options.push(CUSTOM_INPUT_LABEL.dimmed().to_string());
    }
    if options.is_empty() {
        println!("\n{}", "Nothing to choose from.".red());
        return PickResponse::Cancelled;
    }

    let selection = Select::new(&format!("{}:", title), options)
        .with_render_config(wizard_render_config())
        .with_help_message("↑↓ to move, Enter to select, Esc to go back")
        .with_page_size(page_size)
        .raw_prompt();

    match selection {
        Ok(choice) if choice.index < request.items.len() => PickResponse::Item(choice.index),
        Ok(_) => match Text::new("Custom value:")
            .with_render_config(wizard_render_config())
            .prompt()
        {
            Ok(text) => PickResponse::Custom(text),
            Err(e) => cancelled(e, PickResponse::Cancelled),
        },
        Err(e) => cancelled(e, PickResponse::Cancelled),
    }
}

fn input_blocking(request: InputRequest) -> InputResponse {
    let title = request.title.as_deref().unwrap_or("Enter a value");
    if request.validation_message.is_none() {
        display_step_header(request.step, title, request.placeholder.as_deref());
    }
    if let Some(message) = &request.validation_message {
        println!("{} {}", "✗".red(), message.red());
    }

    let message = format!("{}:", title);
    let answer = if request.password {
        Password::new(&message)
            .with_render_config(wizard_render_config())
            .without_confirmation()
            .prompt()
    } else {
        let mut text = Text::new(&message)
            .with_render_config(wizard_render_config())
            .with_help_message("Enter to confirm, Esc to go back");
        if let Some(placeholder) = request.placeholder.as_deref() {
            text = text.with_placeholder(placeholder);
        }
        if let Some(value) = request.value.as_deref() {
            text = text.with_initial_value(value);
        }
        text.prompt()
    };

    match answer {
        Ok(text) => InputResponse::Text(text),
        Err(e) => cancelled(e, InputResponse::Cancelled),
    }
}

fn cancelled<R>(err: InquireError, response: R) -> R {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {}
        other => error!("Prompt failed: {}", other),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_at_least_one() {
        assert_eq!(TerminalUi::new(0).page_size, 1);
        assert_eq!(TerminalUi::default().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_format_option_includes_description() {
        let item = PickItemView {
            label: "us-east-1".to_string(),
            description: Some("US East (N. Virginia)".to_string()),
            detail: None,
        };
        let formatted = format_option(&item);
        assert!(formatted.contains("us-east-1"));
        assert!(formatted.contains("US East (N. Virginia)"));
    }
}
