use thiserror::Error;

/// Errors at the data boundary of the select widget.
///
/// Interaction itself never fails; these only come from decoding
/// externally supplied JSON.
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Invalid option list: {0}")]
    InvalidOptions(#[source] serde_json::Error),
    #[error("Invalid select config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}
