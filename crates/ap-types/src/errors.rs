use thiserror::Error;

/// Main error type for the AnnealPool system
#[derive(Error, Debug)]
pub enum ApError {
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Search-domain and candidate parameter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Invalid range for parameter {name}: {message}")]
    InvalidRange { name: String, message: String },

    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },
}

/// Strategy lifecycle and configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error(
        "Result delivered to exhausted strategy {strategy}: {completed} completed, budget {max_calculations}"
    )]
    PostTerminalConsume {
        strategy: String,
        completed: usize,
        max_calculations: usize,
    },

    #[error("Invalid strategy configuration: {message}")]
    InvalidConfig { message: String },
}

/// Scheduler run errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Worker count must be at least 1, got {worker_count}")]
    InvalidWorkerCount { worker_count: usize },

    #[error("Scheduler is already running")]
    AlreadyRunning,

    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// Failure raised by an objective-function evaluator
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ParameterError> for EvaluationError {
    fn from(err: ParameterError) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type alias for AnnealPool operations
pub type ApResult<T> = Result<T, ApError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::ApError::Validation(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::ApError::Config(format!($($arg)*))
    };
}
