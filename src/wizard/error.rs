//! Error types for wizard definition and runs

use thiserror::Error;

/// Errors raised while declaring a form schema
#[derive(Debug, Error)]
pub enum FormError {
    /// A field path could not be parsed
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The path does not exist in the form's shape
    #[error("Unknown form field: {0} (fields skipped when serializing the default value are not in the form)")]
    UnknownField(String),

    /// A prompter is already bound on an ancestor or descendant of the field
    #[error("Field '{path}' conflicts with the prompter bound on '{bound}'")]
    ConflictingBinding { path: String, bound: String },

    /// The output shape is not a JSON object
    #[error("Form shape must serialize to an object: {0}")]
    InvalidShape(String),
}

/// Errors raised by a wizard run
#[derive(Debug, Error)]
pub enum WizardError {
    /// The form declaration is inconsistent
    #[error(transparent)]
    Form(#[from] FormError),

    /// The run finished but the collected values do not form the output type.
    /// This means a required, visible field has no prompter or default bound.
    #[error("Wizard finished with unfilled fields [{}]: {message}", missing.join(", "))]
    Incomplete {
        /// Visible fields that never received a value
        missing: Vec<String>,
        /// Deserialization failure reported for the output type
        message: String,
    },

    /// A prompted value could not be stored in the form state
    #[error("Failed to store value for '{path}': {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_lists_missing_fields() {
        let error = WizardError::Incomplete {
            missing: vec!["prop1".to_string(), "nested.prop2".to_string()],
            message: "missing field `prop1`".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("prop1, nested.prop2"));
        assert!(message.contains("missing field"));
    }

    #[test]
    fn test_form_error_messages() {
        let unknown = FormError::UnknownField("nope".to_string());
        assert!(unknown.to_string().contains("nope"));
        assert!(unknown.to_string().contains("skipped when serializing"));

        let conflict = FormError::ConflictingBinding {
            path: "prop3.prop1".to_string(),
            bound: "prop3".to_string(),
        };
        assert!(conflict.to_string().contains("prop3.prop1"));
    }
}
