use thiserror::Error;

pub type RpResult<T> = Result<T, RpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
