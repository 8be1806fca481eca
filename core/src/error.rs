use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown charge {charge_id} on case {case_id}")]
    UnknownCharge { case_id: String, charge_id: String },

    #[error("case not found: {0}")]
    CaseNotFound(String),

    #[error("workflow transition error: {0}")]
    WorkflowTransition(String),

    #[error("determinism violation: {0}")]
    DeterminismViolation(String),

    #[error("time format error: {0}")]
    Time(#[from] time::error::Format),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
