//! Rendering backend contract shared by the concrete prompters

use async_trait::async_trait;

/// Position of a prompt within a wizard run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub current: usize,
    pub total: usize,
}

/// One selectable row of a pick list, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItemView {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

/// A choice-list prompt to render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickRequest {
    pub title: Option<String>,
    pub placeholder: Option<String>,
    pub items: Vec<PickItemView>,
    /// Whether free text may be entered instead of picking an item
    pub custom_input: bool,
    pub step: Option<StepInfo>,
}

/// Answer to a [`PickRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResponse {
    /// Index into [`PickRequest::items`]
    Item(usize),
    /// Free text entered through the custom input choice
    Custom(String),
    Cancelled,
}

/// A free-text prompt to render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputRequest {
    pub title: Option<String>,
    pub placeholder: Option<String>,
    /// Initial text
    pub value: Option<String>,
    pub password: bool,
    /// Message from a rejected previous attempt
    pub validation_message: Option<String>,
    pub step: Option<StepInfo>,
}

/// Answer to an [`InputRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResponse {
    Text(String),
    Cancelled,
}

/// Host-supplied renderer for prompts
///
/// Implementations must never fail: anything that prevents an answer is
/// reported as a cancellation.
#[async_trait]
pub trait PromptUi: Send + Sync {
    async fn pick(&self, request: PickRequest) -> PickResponse;

    async fn input(&self, request: InputRequest) -> InputResponse;
}
