use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A tag that mandates a field was handed a node without it. Fatal for
    /// the subtree; never coerced into a best-effort result.
    #[error("node `{kind}` is missing required field `{field}`")]
    MissingField { kind: String, field: String },
    /// A tag-name position (element open/close tag) held a node kind that
    /// cannot be spelled as a name in the target grammar.
    #[error("node `{kind}` cannot appear in tag-name position")]
    BadTagName { kind: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn missing_field(kind: impl Into<String>, field: impl Into<String>) -> Self {
        Error::MissingField {
            kind: kind.into(),
            field: field.into(),
        }
    }

    pub fn bad_tag_name(kind: impl Into<String>) -> Self {
        Error::BadTagName { kind: kind.into() }
    }
}

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

// Convert from std::io::Error to our Error type
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
