use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::state::AppState;

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/tools", get(handlers::handle_list_tools))
        .route("/get_toolcall", post(handlers::handle_get_toolcall))
        .route("/execute_toolcall", post(handlers::handle_execute_toolcall))
        .route("/answer", post(handlers::handle_answer))
}
