use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("invalid employeeId: {0}")]
    EmployeeNotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage failure")]
    Store(#[from] anyhow::Error),
}

impl HrError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
