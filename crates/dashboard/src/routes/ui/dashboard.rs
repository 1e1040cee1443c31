use axum::response::Html;

use crate::templates::dashboard_page;

/// Handler for the dashboard page (GET /)
pub async fn dashboard_handler() -> Html<String> {
    Html(dashboard_page().into_string())
}
