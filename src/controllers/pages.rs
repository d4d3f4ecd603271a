use axum::{
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::AppState;

// Client documents are embedded at compile time so the binary serves itself.
const HOME_PAGE: &str = include_str!("../../public/home.html");
const APP_PAGE: &str = include_str!("../../public/index.html");

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}

// GET /
async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

// Catch-all: any unmatched path serves the booking app document.
pub async fn spa_fallback() -> Html<&'static str> {
    Html(APP_PAGE)
}
