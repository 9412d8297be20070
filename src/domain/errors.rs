use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Not enough stock: requested {requested}, available {available}")]
    StockInsufficient { requested: i32, available: i32 },
    #[error("Illegal state: {0}")]
    IllegalState(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
