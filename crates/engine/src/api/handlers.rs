use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use switchboard_shared::{executor, registry};

use crate::orchestrator;
use crate::resolver::{self, ResolvedIntent};
use crate::state::AppState;

use super::types::*;

pub async fn health_check() -> &'static str {
    "Switchboard is running"
}

pub async fn handle_list_tools() -> impl IntoResponse {
    Json(json!({ "tools": registry::get_tools() }))
}

/// Resolve a prompt into a tool-call object without executing it. The body
/// carries either the parsed call map or, on fallback, the model's raw text.
pub async fn handle_get_toolcall(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> impl IntoResponse {
    let tools = registry::get_tools();

    match resolver::resolve(&state.llm, &req.prompt, &tools, true).await {
        Ok(ResolvedIntent::ToolCalls(calls)) => {
            (StatusCode::OK, Json(json!({ "tool_call": calls })))
        }
        Ok(ResolvedIntent::FreeText(text)) => {
            (StatusCode::OK, Json(json!({ "tool_call": text })))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Prompt could not be understood as a tool call: {}", e) })),
        ),
    }
}

/// Execute a previously resolved call map. Always one result entry per
/// requested tool; per-tool failures are folded into that tool's text.
pub async fn handle_execute_toolcall(Json(req): Json<ExecuteRequest>) -> impl IntoResponse {
    let results = executor::execute_all(&req.tool_call);

    (StatusCode::OK, Json(json!({ "tools_result": results })))
}

/// Full resolve → execute → answer loop.
pub async fn handle_answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> impl IntoResponse {
    match orchestrator::answer(&state.llm, &req.prompt).await {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to answer prompt: {}", e) })),
        ),
    }
}
