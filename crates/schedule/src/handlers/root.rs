use axum::Json;

/// GET / - Greeting that points at the API routes.
pub async fn root() -> Json<&'static str> {
    Json("Welcome to Schedule API. Use /subjects and /tasks to manage your schedule")
}
