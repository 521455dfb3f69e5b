//! Error types for the wheel screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Cost basis is required for covered calls")]
    MissingCostBasis,

    #[error("Annualized return undefined: {0}")]
    UndefinedAnnualization(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ScreenResult<T> = Result<T, ScreenError>;

impl ScreenError {
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn undefined_annualization(msg: impl Into<String>) -> Self {
        Self::UndefinedAnnualization(msg.into())
    }

    pub fn numerical(msg: impl Into<String>) -> Self {
        Self::Numerical(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors_build_their_variants() {
        assert!(matches!(ScreenError::data("x"), ScreenError::Data(_)));
        assert!(matches!(ScreenError::numerical("x"), ScreenError::Numerical(_)));
        assert!(matches!(
            ScreenError::invalid_input("x"),
            ScreenError::InvalidInput(_)
        ));
        assert!(matches!(
            ScreenError::invalid_record("x"),
            ScreenError::InvalidRecord(_)
        ));
        assert!(matches!(
            ScreenError::undefined_annualization("x"),
            ScreenError::UndefinedAnnualization(_)
        ));

        assert_eq!(
            ScreenError::data("no rows").to_string(),
            "Data error: no rows"
        );
    }
}
