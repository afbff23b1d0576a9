//! Quick-pick prompter: choose one item from a list, optionally typing a
//! custom value instead

use super::backend::{PickItemView, PickRequest, PickResponse, PromptUi, StepInfo};
use super::{PromptResult, Prompter};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

type CustomInputTransform<T> = Box<dyn Fn(&str) -> T + Send + Sync>;

/// A pick-list entry carrying the value it produces
#[derive(Debug, Clone, PartialEq)]
pub struct DataQuickPickItem<T> {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub data: T,
}

impl<T> DataQuickPickItem<T> {
    pub fn new(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            description: None,
            detail: None,
            data,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn view(&self) -> PickItemView {
        PickItemView {
            label: self.label.clone(),
            description: self.description.clone(),
            detail: self.detail.clone(),
        }
    }
}

/// Create a quick-pick prompter over `items`, rendered by `ui`
pub fn create_quick_pick<T>(
    ui: Arc<dyn PromptUi>,
    items: Vec<DataQuickPickItem<T>>,
) -> QuickPickPrompter<T> {
    QuickPickPrompter {
        ui,
        items,
        title: None,
        placeholder: None,
        custom_input: None,
        step: None,
    }
}

pub struct QuickPickPrompter<T> {
    ui: Arc<dyn PromptUi>,
    items: Vec<DataQuickPickItem<T>>,
    title: Option<String>,
    placeholder: Option<String>,
    custom_input: Option<CustomInputTransform<T>>,
    step: Option<StepInfo>,
}

impl<T> QuickPickPrompter<T> {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Accept free text in addition to the listed items. The raw text is
    /// turned into a value by `transform`.
    pub fn set_custom_input<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.custom_input = Some(Box::new(transform));
        self
    }

    pub fn items(&self) -> &[DataQuickPickItem<T>] {
        &self.items
    }

    fn request(&self) -> PickRequest {
        PickRequest {
            title: self.title.clone(),
            placeholder: self.placeholder.clone(),
            items: self.items.iter().map(DataQuickPickItem::view).collect(),
            custom_input: self.custom_input.is_some(),
            step: self.step,
        }
    }
}

#[async_trait]
impl<T> Prompter for QuickPickPrompter<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    async fn prompt(&mut self) -> PromptResult<T> {
        let request = self.request();
        match self.ui.pick(request).await {
            PickResponse::Item(index) => match self.items.get(index) {
                Some(item) => {
                    debug!("Picked '{}'", item.label);
                    PromptResult::Answered(item.data.clone())
                }
                None => {
                    warn!(
                        "Pick index {} is out of range for {} items",
                        index,
                        self.items.len()
                    );
                    PromptResult::Cancelled
                }
            },
            PickResponse::Custom(text) => match &self.custom_input {
                Some(transform) => {
                    debug!("Custom input '{}'", text);
                    PromptResult::Answered(transform(&text))
                }
                None => {
                    warn!("Custom input given to a pick list that does not accept it");
                    PromptResult::Cancelled
                }
            },
            PickResponse::Cancelled => PromptResult::Cancelled,
        }
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.step = Some(StepInfo { current, total });
    }
}
