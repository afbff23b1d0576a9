//! Wizard state machine
//!
//! Each iteration fills one field: the first visible, unfilled leaf of the
//! form in declaration order. Cancelling a prompt steps back to the previous
//! prompted field; cancelling the very first prompt cancels the run.

use super::error::{FormError, WizardError};
use super::form::{FormSchema, Step};
use super::path::FieldPath;
use super::state::FormState;
use crate::ui::PromptResult;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Lifecycle of a wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStatus {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Prompted,
    Defaulted,
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    path: FieldPath,
    origin: Origin,
}

/// Values and navigation history of one `run()`
#[derive(Debug, Default)]
struct WizardRun {
    state: FormState,
    history: Vec<HistoryEntry>,
}

impl WizardRun {
    fn record(&mut self, path: FieldPath, value: serde_json::Value, origin: Origin) {
        self.state.set(&path, value);
        self.history.push(HistoryEntry { path, origin });
    }

    fn prompted(&self) -> usize {
        self.history
            .iter()
            .filter(|entry| entry.origin == Origin::Prompted)
            .count()
    }

    /// Undo history up to and including the last prompted field. Returns
    /// `false` when there was no prompted field to go back to.
    fn step_back(&mut self) -> bool {
        while let Some(entry) = self.history.pop() {
            self.state.remove(&entry.path);
            if entry.origin == Origin::Prompted {
                debug!("Stepping back to '{}'", entry.path);
                return true;
            }
        }
        false
    }
}

/// Drives a [`FormSchema`] to produce a value of type `T`
pub struct Wizard<T> {
    form: FormSchema,
    status: WizardStatus,
    _output: PhantomData<fn() -> T>,
}

impl<T> Wizard<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Create a wizard whose form is derived from the shape of `T`
    pub fn new() -> Result<Self, FormError> {
        Ok(Self::with_form(FormSchema::from_shape::<T>()?))
    }
}

impl<T> Wizard<T>
where
    T: DeserializeOwned,
{
    pub fn with_form(form: FormSchema) -> Self {
        Self {
            form,
            status: WizardStatus::NotStarted,
            _output: PhantomData,
        }
    }

    pub fn form(&self) -> &FormSchema {
        &self.form
    }

    /// Form access for binding prompters, defaults and predicates
    pub fn form_mut(&mut self) -> &mut FormSchema {
        &mut self.form
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    /// Run the wizard to completion.
    ///
    /// Returns `Ok(None)` if the user cancels the first step, and
    /// `Err(WizardError::Incomplete)` if the collected values do not form a `T`
    /// (a required field has nothing bound to fill it).
    pub async fn run(&mut self) -> Result<Option<T>, WizardError> {
        self.form.validate()?;
        self.status = WizardStatus::Running;
        let mut run = WizardRun::default();

        while let Some(step) = self.form.next_step(&run.state) {
            match step {
                Step::Default { path, value } => {
                    debug!("Filling '{}' from its default", path);
                    run.record(path, value, Origin::Defaulted);
                }
                Step::Prompt { path, mut prompter } => {
                    let answered = run.prompted();
                    let remaining = self.form.remaining_prompts(&run.state);
                    prompter.set_steps(answered + 1, answered + remaining.max(1));
                    debug!("Prompting for '{}'", path);

                    match prompter.prompt_value().await {
                        PromptResult::Answered(Ok(value)) => {
                            run.record(path, value, Origin::Prompted);
                        }
                        PromptResult::Answered(Err(source)) => {
                            self.status = WizardStatus::NotStarted;
                            return Err(WizardError::Serialize {
                                path: path.to_string(),
                                source,
                            });
                        }
                        PromptResult::Cancelled => {
                            if !run.step_back() {
                                info!("Wizard cancelled at '{}'", path);
                                self.status = WizardStatus::Cancelled;
                                return Ok(None);
                            }
                        }
                    }
                }
            }
        }

        self.finish(run)
    }

    fn finish(&mut self, run: WizardRun) -> Result<Option<T>, WizardError> {
        let missing: Vec<String> = self
            .form
            .unfilled_visible(&run.state)
            .iter()
            .map(ToString::to_string)
            .collect();

        match serde_json::from_value::<T>(run.state.into_value()) {
            Ok(output) => {
                if !missing.is_empty() {
                    debug!("Completed with optional fields unset: {:?}", missing);
                }
                info!("Wizard completed");
                self.status = WizardStatus::Completed;
                Ok(Some(output))
            }
            Err(e) => {
                self.status = WizardStatus::NotStarted;
                Err(WizardError::Incomplete {
                    missing,
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn path(input: &str) -> FieldPath {
        FieldPath::parse(input).unwrap()
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Pair {
        a: String,
        b: u32,
    }

    #[test]
    fn test_step_back_pops_defaults_with_prompted_entry() {
        let mut run = WizardRun::default();
        run.record(path("a"), json!("x"), Origin::Prompted);
        run.record(path("b"), json!(1), Origin::Defaulted);
        run.record(path("c"), json!(2), Origin::Defaulted);

        assert!(run.step_back());
        assert!(run.state.is_empty());
        assert!(run.history.is_empty());
    }

    #[test]
    fn test_step_back_without_prompted_entry() {
        let mut run = WizardRun::default();
        run.record(path("a"), json!("x"), Origin::Defaulted);

        assert!(!run.step_back());
        assert!(run.state.is_empty());
    }

    #[tokio::test]
    async fn test_defaults_only_wizard_completes_without_prompting() {
        let mut wizard = Wizard::<Pair>::new().unwrap();
        wizard
            .form_mut()
            .field("a")
            .unwrap()
            .set_default(|_| Some("fixed"));
        wizard
            .form_mut()
            .field("b")
            .unwrap()
            .set_default(|state: &FormState| {
                state.get_as::<String>("a").map(|a| a.len() as u32)
            });

        assert_eq!(wizard.status(), WizardStatus::NotStarted);
        let output = wizard.run().await.unwrap().unwrap();
        assert_eq!(output.a, "fixed");
        assert_eq!(output.b, 5);
        assert_eq!(wizard.status(), WizardStatus::Completed);
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Outer {
        inner: Pair,
    }

    #[tokio::test]
    async fn test_object_default_completes_nested_fields() {
        let mut wizard = Wizard::<Outer>::new().unwrap();
        wizard.form_mut().field("inner").unwrap().set_default(|_| {
            Some(Pair {
                a: "x".to_string(),
                b: 1,
            })
        });

        let output = wizard.run().await.unwrap().unwrap();
        assert_eq!(
            output.inner,
            Pair {
                a: "x".to_string(),
                b: 1
            }
        );
        assert_eq!(wizard.status(), WizardStatus::Completed);
    }

    #[tokio::test]
    async fn test_missing_binding_is_incomplete() {
        let mut wizard = Wizard::<Pair>::new().unwrap();
        wizard
            .form_mut()
            .field("a")
            .unwrap()
            .set_default(|_| Some("only a"));

        match wizard.run().await {
            Err(WizardError::Incomplete { missing, .. }) => assert_eq!(missing, ["b"]),
            other => panic!("expected an incomplete wizard, got {:?}", other.map(|_| ())),
        }
        assert_eq!(wizard.status(), WizardStatus::NotStarted);
    }
}
