use thiserror::Error;

/// An error from unsuccessful mapping or database operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperErr {
    /// No mapper is registered for the requested entity class
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    /// The mapper of `class` declares no property with this name
    #[error("Unknown property `{property}` on class {class}")]
    UnknownProperty {
        /// Entity class the property was looked up on
        class: String,
        /// The missing property
        property: String,
    },
    /// There was a problem with the database connection
    #[error("Connection Error: {0}")]
    Conn(String),
    /// An operation did not execute successfully
    #[error("Execution Error: {0}")]
    Exec(String),
    /// An error occurred while performing a query
    #[error("Query Error: {0}")]
    Query(String),
    /// The record was not found in the database
    #[error("RecordNotFound Error: {0}")]
    RecordNotFound(String),
    /// Error occurred while converting a value to the target type
    #[error("Type Error: {0}")]
    Type(String),
    /// A custom error
    #[error("Custom Error: {0}")]
    Custom(String),
}

impl MapperErr {
    pub(crate) fn unknown_property(class: &str, property: &str) -> Self {
        Self::UnknownProperty {
            class: class.to_owned(),
            property: property.to_owned(),
        }
    }
}
