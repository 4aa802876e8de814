use thiserror::Error;

/// Errors emitted by the evaluator.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid Turtle document: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),
    #[error("unsupported statement: {0}")]
    Unsupported(String),
    #[error("validation failed with {0} error(s)")]
    Violations(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
