use thiserror::Error;

/// Failures surfaced by the tool executor. Per-call errors are folded into
/// result text by `executor::execute_all` so one bad call never sinks a batch.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    NotFound(String),

    #[error("Tool '{tool}' failed: {message}")]
    Execution { tool: String, message: String },
}
