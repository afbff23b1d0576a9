//! Shared rendering utilities for terminal prompts

use super::backend::StepInfo;
use colored::Colorize;
use inquire::ui::{Color, IndexPrefix, RenderConfig, StyleSheet, Styled};

/// Get the standard render config for wizard prompts
pub fn wizard_render_config() -> RenderConfig<'static> {
    RenderConfig::default()
        .with_highlighted_option_prefix(Styled::new("▸ ").with_fg(Color::LightCyan))
        .with_option_index_prefix(IndexPrefix::Simple)
        .with_selected_option(Some(StyleSheet::new().with_fg(Color::LightCyan)))
        .with_scroll_up_prefix(Styled::new("▲ "))
        .with_scroll_down_prefix(Styled::new("▼ "))
}

/// Display a wizard step header box
pub fn display_step_header(step: Option<StepInfo>, title: &str, description: Option<&str>) {
    let term_width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    let box_width = term_width.clamp(20, 70);
    let inner_width = box_width - 4;

    println!();
    let header = match step {
        Some(step) => format!("─ Step {}/{} · {} ", step.current, step.total, title),
        None => format!("─ {} ", title),
    };
    println!(
        "{}{}{}",
        "┌".bright_cyan(),
        header.bright_cyan(),
        "─".repeat(inner_width.saturating_sub(header.chars().count())).bright_cyan()
    );

    if let Some(description) = description {
        for line in textwrap::wrap(description, inner_width - 2) {
            println!("{}  {}", "│".dimmed(), line.white());
        }
    }

    println!("{}{}", "└".dimmed(), "─".repeat(box_width - 1).dimmed());
}
