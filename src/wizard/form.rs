//! Form schema: the declarative tree of fields a wizard fills
//!
//! The tree mirrors the serialized shape of the wizard's output type. Each
//! node may carry a prompter factory, a default provider and a visibility
//! predicate, all of which receive the current [`FormState`].

use super::error::FormError;
use super::path::FieldPath;
use super::state::FormState;
use crate::ui::{PromptResult, Prompter};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

type PrompterFactory = Box<dyn Fn(&FormState) -> Option<Box<dyn StepPrompter>> + Send + Sync>;
type DefaultProvider = Box<dyn Fn(&FormState) -> Option<Value> + Send + Sync>;
type Predicate = Box<dyn Fn(&FormState) -> bool + Send + Sync>;

/// Type-erased prompter producing JSON values for the form state
#[async_trait]
pub(crate) trait StepPrompter: Send {
    async fn prompt_value(&mut self) -> PromptResult<Result<Value, serde_json::Error>>;

    fn set_steps(&mut self, current: usize, total: usize);
}

struct ErasedPrompter<P>(P);

#[async_trait]
impl<P> StepPrompter for ErasedPrompter<P>
where
    P: Prompter + 'static,
    P::Output: Serialize,
{
    async fn prompt_value(&mut self) -> PromptResult<Result<Value, serde_json::Error>> {
        self.0.prompt().await.map(serde_json::to_value)
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.0.set_steps(current, total);
    }
}

/// One field of a form, possibly with nested children
pub struct FormNode {
    key: String,
    children: Vec<FormNode>,
    prompter: Option<PrompterFactory>,
    default: Option<DefaultProvider>,
    show_when: Option<Predicate>,
}

impl FormNode {
    fn from_shape(key: &str, shape: &Value) -> Self {
        let children = match shape {
            Value::Object(fields) => fields
                .iter()
                .map(|(child_key, child_shape)| FormNode::from_shape(child_key, child_shape))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            key: key.to_string(),
            children,
            prompter: None,
            default: None,
            show_when: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn children(&self) -> &[FormNode] {
        &self.children
    }

    /// A nested node is expanded into its children instead of being prompted
    pub fn is_nested(&self) -> bool {
        !self.children.is_empty() && self.prompter.is_none()
    }

    pub fn has_prompter(&self) -> bool {
        self.prompter.is_some()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Bind the prompter that fills this field. The factory is called with the
    /// current state each time the field is reached.
    pub fn bind_prompter<P, F>(&mut self, factory: F) -> &mut Self
    where
        P: Prompter + 'static,
        P::Output: Serialize,
        F: Fn(&FormState) -> P + Send + Sync + 'static,
    {
        self.bind_optional_prompter(move |state| Some(factory(state)))
    }

    /// Like [`FormNode::bind_prompter`], but the factory may decline to prompt,
    /// in which case the default provider (if any) fills the field
    pub fn bind_optional_prompter<P, F>(&mut self, factory: F) -> &mut Self
    where
        P: Prompter + 'static,
        P::Output: Serialize,
        F: Fn(&FormState) -> Option<P> + Send + Sync + 'static,
    {
        if self.prompter.is_some() {
            debug!("Replacing prompter bound on '{}'", self.key);
        }
        self.prompter = Some(Box::new(move |state| {
            factory(state).map(|prompter| Box::new(ErasedPrompter(prompter)) as Box<dyn StepPrompter>)
        }));
        self
    }

    /// Value used without prompting when no prompter is bound or the bound
    /// factory declines. On an object field the value fills the whole object
    /// while none of its children are stored yet.
    pub fn set_default<V, F>(&mut self, provider: F) -> &mut Self
    where
        V: Serialize,
        F: Fn(&FormState) -> Option<V> + Send + Sync + 'static,
    {
        let key = self.key.clone();
        self.default = Some(Box::new(move |state| {
            let value = provider(state)?;
            match serde_json::to_value(value) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Default for '{}' could not be serialized: {}", key, e);
                    None
                }
            }
        }));
        self
    }

    /// Only visit this field (and its children) while `predicate` holds
    pub fn show_when<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&FormState) -> bool + Send + Sync + 'static,
    {
        self.show_when = Some(Box::new(predicate));
        self
    }

    fn is_shown(&self, state: &FormState) -> bool {
        self.show_when.as_ref().is_none_or(|predicate| predicate(state))
    }

    fn is_leaf(&self) -> bool {
        !self.is_nested()
    }

    fn child(&self, key: &str) -> Option<&FormNode> {
        self.children.iter().find(|child| child.key == key)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut FormNode> {
        self.children.iter_mut().find(|child| child.key == key)
    }

    fn find_bound_descendant(&self, path: &FieldPath) -> Option<FieldPath> {
        self.children.iter().find_map(|child| {
            let child_path = path.child(&child.key);
            if child.prompter.is_some() {
                Some(child_path)
            } else {
                child.find_bound_descendant(&child_path)
            }
        })
    }
}

/// Next thing the wizard has to do to fill the form
pub(crate) enum Step {
    Prompt {
        path: FieldPath,
        prompter: Box<dyn StepPrompter>,
    },
    Default {
        path: FieldPath,
        value: Value,
    },
}

/// Declarative description of every field a wizard can fill
pub struct FormSchema {
    root: FormNode,
}

impl FormSchema {
    /// Derive the schema from the serialized shape of `T::default()`.
    /// Field order follows the type's declaration order. Fields the default
    /// value does not serialize (for example `skip_serializing_if` on a `None`)
    /// are not part of the schema and cannot be bound.
    pub fn from_shape<T: Serialize + Default>() -> Result<Self, FormError> {
        let shape = serde_json::to_value(T::default())
            .map_err(|e| FormError::InvalidShape(e.to_string()))?;
        Self::from_value(&shape)
    }

    /// Build the schema from an explicit JSON shape
    pub fn from_value(shape: &Value) -> Result<Self, FormError> {
        if !shape.is_object() {
            return Err(FormError::InvalidShape(format!(
                "expected an object, found {}",
                shape
            )));
        }
        Ok(Self {
            root: FormNode::from_shape("", shape),
        })
    }

    /// Access a field for binding by dotted path
    pub fn field(&mut self, path: &str) -> Result<&mut FormNode, FormError> {
        let path = FieldPath::parse(path)?;

        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node
                .child_mut(segment)
                .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        }
        Ok(node)
    }

    pub fn node(&self, path: &FieldPath) -> Option<&FormNode> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Top-level fields in declaration order
    pub fn fields(&self) -> &[FormNode] {
        self.root.children()
    }

    /// Paths of every leaf, depth-first in declaration order
    pub fn leaves(&self) -> Vec<FieldPath> {
        let mut leaves = Vec::new();
        collect_leaves(&self.root, &FieldPath::root(), &mut leaves);
        leaves
    }

    /// Visible leaves that hold no value in `state`
    pub fn unfilled_visible(&self, state: &FormState) -> Vec<FieldPath> {
        let mut unfilled = Vec::new();
        walk_visible(&self.root, &FieldPath::root(), state, &mut |node, path| {
            if node.is_leaf() && !state.contains(path) {
                unfilled.push(path.clone());
            }
        });
        unfilled
    }

    /// Number of visible, unfilled leaves that have a prompter bound
    pub(crate) fn remaining_prompts(&self, state: &FormState) -> usize {
        let mut count = 0;
        walk_visible(&self.root, &FieldPath::root(), state, &mut |node, path| {
            if node.is_leaf() && node.prompter.is_some() && !state.contains(path) {
                count += 1;
            }
        });
        count
    }

    /// First visible, unfilled leaf that can be filled, with how to fill it
    pub(crate) fn next_step(&self, state: &FormState) -> Option<Step> {
        next_step_in(&self.root, &FieldPath::root(), state)
    }

    /// Reject prompters bound both on a node and on one of its descendants
    pub fn validate(&self) -> Result<(), FormError> {
        validate_bindings(&self.root, &FieldPath::root())
    }
}

fn validate_bindings(node: &FormNode, path: &FieldPath) -> Result<(), FormError> {
    for child in &node.children {
        let child_path = path.child(&child.key);
        if child.prompter.is_some() {
            if let Some(bound) = child.find_bound_descendant(&child_path) {
                return Err(FormError::ConflictingBinding {
                    path: bound.to_string(),
                    bound: child_path.to_string(),
                });
            }
        } else {
            validate_bindings(child, &child_path)?;
        }
    }
    Ok(())
}

fn collect_leaves(node: &FormNode, path: &FieldPath, leaves: &mut Vec<FieldPath>) {
    for child in &node.children {
        let child_path = path.child(&child.key);
        if child.is_leaf() {
            leaves.push(child_path);
        } else {
            collect_leaves(child, &child_path, leaves);
        }
    }
}

fn walk_visible(
    node: &FormNode,
    path: &FieldPath,
    state: &FormState,
    visit: &mut dyn FnMut(&FormNode, &FieldPath),
) {
    for child in &node.children {
        if !child.is_shown(state) {
            continue;
        }
        let child_path = path.child(&child.key);
        visit(child, &child_path);
        if child.is_nested() {
            walk_visible(child, &child_path, state, visit);
        }
    }
}

fn next_step_in(node: &FormNode, path: &FieldPath, state: &FormState) -> Option<Step> {
    for child in &node.children {
        if !child.is_shown(state) {
            continue;
        }
        let child_path = path.child(&child.key);

        if child.is_nested() {
            // An untouched object with a default is filled whole
            if !state.contains(&child_path) {
                if let Some(value) = child.default.as_ref().and_then(|provider| provider(state)) {
                    return Some(Step::Default {
                        path: child_path,
                        value,
                    });
                }
            }
            if let Some(step) = next_step_in(child, &child_path, state) {
                return Some(step);
            }
            continue;
        }

        if state.contains(&child_path) {
            continue;
        }

        if let Some(prompter) = child.prompter.as_ref().and_then(|factory| factory(state)) {
            return Some(Step::Prompt {
                path: child_path,
                prompter,
            });
        }

        if let Some(value) = child.default.as_ref().and_then(|provider| provider(state)) {
            return Some(Step::Default {
                path: child_path,
                value,
            });
        }

        debug!("Field '{}' has no prompter or default, skipping", child_path);
    }
    None
}
