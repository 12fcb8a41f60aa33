use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Number is too large (maximum is {max})")]
    TooLarge { max: u64 },

    #[error("Minimum ({min}) must be less than maximum ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("Count must be between 1 and {max}")]
    InvalidCount { max: usize },

    #[error("Cannot generate {requested} unique numbers from a range of only {available}")]
    NotEnoughUnique { requested: usize, available: u64 },
}
