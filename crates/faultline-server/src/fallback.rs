use faultline_core::DomainError;

use crate::AppError;

/// Answer a request that matched no route
pub fn not_found(message: &str) -> AppError {
    DomainError::not_found(message).into()
}
