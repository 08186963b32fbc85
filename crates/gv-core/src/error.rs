use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown {what}: {value}")]
    UnknownChoice { what: &'static str, value: String },

    #[error("Unknown route label: {0}")]
    UnknownRoute(String),
}
