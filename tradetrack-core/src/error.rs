use thiserror::Error;

/// The main result type for tradetrack-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Every failure a core workflow can signal.
///
/// Caller-side conditions (`InvalidVector`, `WrongDimension`, `LowConfidence`,
/// `NoCandidates`, `NotFound`, `AlreadyExists`, `AlreadyClockedIn`,
/// `NotClockedIn`) are expected outcomes. `Misconfigured` and `StoreFailure`
/// are system-side; see [`CoreError::is_server_side`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    WrongDimension { expected: usize, actual: usize },

    #[error("Face confidence too low: {0}")]
    LowConfidence(String),

    #[error("No employees registered, cannot perform match")]
    NoCandidates,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Employee already exists: {0}")]
    AlreadyExists(String),

    #[error("Employee is already clocked in: {0}")]
    AlreadyClockedIn(String),

    #[error("Employee is not clocked in: {0}")]
    NotClockedIn(String),

    #[error("Server misconfigured: {0}")]
    Misconfigured(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl CoreError {
    /// True for failures that are not the caller's fault.
    pub fn is_server_side(&self) -> bool {
        matches!(self, CoreError::Misconfigured(_) | CoreError::StoreFailure(_))
    }

    /// Stable machine-readable code for this failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidVector(_) => "INVALID_VECTOR",
            CoreError::WrongDimension { .. } => "WRONG_DIMENSION",
            CoreError::LowConfidence(_) => "FACE_CONFIDENCE_TOO_LOW",
            CoreError::NoCandidates => "NO_EMPLOYEES",
            CoreError::NotFound(_) => "EMPLOYEE_NOT_FOUND",
            CoreError::AlreadyExists(_) => "EMPLOYEE_ALREADY_EXISTS",
            CoreError::AlreadyClockedIn(_) => "ALREADY_CLOCKED_IN",
            CoreError::NotClockedIn(_) => "NOT_CLOCKED_IN",
            CoreError::Misconfigured(_) => "SERVER_MISCONFIGURED",
            CoreError::StoreFailure(_) => "DB_ERROR",
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::StoreFailure(err.to_string())
    }
}
