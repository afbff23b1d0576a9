//! Multi-step form wizard
//!
//! A [`Wizard`] fills a value of its output type one field at a time. The
//! fields come from a [`FormSchema`] derived from the type's serialized shape;
//! each field is bound to a prompter factory, a default provider and/or a
//! visibility predicate.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloud_toolkit::ui::{create_quick_pick, DataQuickPickItem, TerminalUi};
//! use cloud_toolkit::wizard::Wizard;
//! use std::sync::Arc;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Target {
//!     region: String,
//! }
//!
//! let ui: Arc<dyn PromptUi> = Arc::new(TerminalUi::default());
//! let mut wizard = Wizard::<Target>::new()?;
//! wizard.form_mut().field("region")?.bind_prompter(move |_| {
//!     create_quick_pick(ui.clone(), vec![DataQuickPickItem::new("us-east-1", "us-east-1".to_string())])
//! });
//! let target = wizard.run().await?;
//! ```

mod engine;
pub mod error;
pub mod form;
pub mod path;
pub mod state;

pub use engine::{Wizard, WizardStatus};
pub use error::{FormError, WizardError};
pub use form::{FormNode, FormSchema};
pub use path::FieldPath;
pub use state::FormState;
