use thiserror::Error;


#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("section {0} is never closed")]
    UnclosedSection(String),

    #[error("unexpected end of section {found}{}", expected_suffix(.expected))]
    UnexpectedEndSection { expected: Option<String>, found: String },

    #[error("partial not found: {0}")]
    PartialNotFound(String),

    #[error("no handler registered for modifier '{0}'")]
    UnknownModifier(char),

    #[error("modifier '{0}' is reserved")]
    ReservedModifier(char),

    #[error("nesting depth limit of {0} exceeded")]
    DepthExceeded(usize),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Encoding { encoding: String, ch: char },

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

fn expected_suffix(expected: &Option<String>) -> String {
    match expected {
        Some(name) => format!(" (expected {})", name),
        None => " (no section is open)".to_owned()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
