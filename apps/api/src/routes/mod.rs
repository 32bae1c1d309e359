pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::links::handlers as links;
use crate::state::AppState;
use crate::storage::handlers as storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/documents", post(editor::handle_create_document))
        .route(
            "/api/v1/documents/:id",
            get(editor::handle_get_document).delete(editor::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/reset",
            post(editor::handle_reset_document),
        )
        .route(
            "/api/v1/documents/:id/background",
            patch(editor::handle_set_background),
        )
        // Blocks and dividers
        .route(
            "/api/v1/documents/:id/blocks",
            post(editor::handle_add_block),
        )
        .route(
            "/api/v1/documents/:id/blocks/:block_id",
            patch(editor::handle_update_block).delete(editor::handle_delete_block),
        )
        .route(
            "/api/v1/documents/:id/blocks/:block_id/display",
            get(editor::handle_block_display),
        )
        .route(
            "/api/v1/documents/:id/dividers",
            post(editor::handle_add_divider),
        )
        // Interaction
        .route(
            "/api/v1/documents/:id/events",
            post(editor::handle_dispatch_event),
        )
        .route(
            "/api/v1/documents/:id/overlay",
            get(editor::handle_get_overlay),
        )
        // Export
        .route("/api/v1/documents/:id/export", post(export::handle_export))
        .route(
            "/api/v1/documents/:id/template",
            get(export::handle_template),
        )
        // Auto-save
        .route(
            "/api/v1/documents/:id/snapshot",
            get(storage::handle_get_snapshot)
                .put(storage::handle_put_snapshot)
                .delete(storage::handle_delete_snapshot),
        )
        .route("/api/v1/links/rewrite", post(links::handle_rewrite))
        .with_state(state)
}
