use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{livez, readyz},
        root::root,
        subjects::{
            create_subject, delete_subject, get_subject, list_subjects, toggle_subject_archived,
            update_subject,
        },
        tasks::{
            create_task, delete_task, get_task, list_tasks, toggle_task_archived, update_task,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let timeout = state.request_timeout;

    Router::new()
        .route("/", get(root))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        // Subject routes
        .route("/subjects", get(list_subjects))
        .route("/subjects/add", post(create_subject))
        .route("/subjects/update", put(update_subject))
        .route("/subjects/delete/{id}", delete(delete_subject))
        .route("/subjects/{id}", get(get_subject))
        .route("/subjects/{id}/archive", patch(toggle_subject_archived))
        // Task routes
        .route("/tasks", get(list_tasks))
        .route("/tasks/add", post(create_task))
        .route("/tasks/update", put(update_task))
        .route("/tasks/delete/{id}", delete(delete_task))
        .route("/tasks/{id}", get(get_task))
        .route("/tasks/{id}/archive", patch(toggle_task_archived))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{config::Config, storage::SqliteRepository};

    async fn test_app() -> Router {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let config = Config {
            sqlite_path: ":memory:".to_string(),
            request_timeout_seconds: 10,
        };
        create_app(AppState::new(repo, &config))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn add_math(app: &Router) -> Value {
        let response = send(
            app,
            "POST",
            "/subjects/add",
            Some(json!({ "label": "Math", "color": "blue" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    async fn add_monday_task(app: &Router, subject_id: i64) -> Value {
        let response = send(
            app,
            "POST",
            "/tasks/add",
            Some(json!({
                "subject_id": subject_id,
                "day": "monday",
                "start_time": "09:00",
                "end_time": "10:00"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_root() {
        let app = test_app().await;

        let response = send(&app, "GET", "/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.as_str().unwrap().starts_with("Welcome to Schedule API"));
    }

    #[tokio::test]
    async fn test_health_probes() {
        let app = test_app().await;

        assert_eq!(send(&app, "GET", "/livez", None).await.status(), StatusCode::OK);

        let response = send(&app, "GET", "/readyz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "healthy": true }));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = test_app().await;

        let subjects = body_json(send(&app, "GET", "/subjects", None).await).await;
        let tasks = body_json(send(&app, "GET", "/tasks", None).await).await;

        assert_eq!(subjects, json!([]));
        assert_eq!(tasks, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get_subject() {
        let app = test_app().await;

        let created = add_math(&app).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["label"], "Math");
        assert_eq!(created["color"], "blue");
        assert_eq!(created["archived"], false);
        assert!(created["ts"].is_string());

        let response = send(&app, "GET", "/subjects/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_get_missing_subject_is_404() {
        let app = test_app().await;

        let response = send(&app, "GET", "/subjects/5", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Subject not found: 5" })
        );
    }

    #[tokio::test]
    async fn test_duplicate_label_is_400() {
        let app = test_app().await;
        add_math(&app).await;

        let response = send(
            &app,
            "POST",
            "/subjects/add",
            Some(json!({ "label": "Math", "color": "green" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let subjects = body_json(send(&app, "GET", "/subjects", None).await).await;
        assert_eq!(subjects.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let app = test_app().await;

        let response = send(
            &app,
            "POST",
            "/subjects/add",
            Some(json!({ "color": "green" })),
        )
        .await;

        assert!(response.status().is_client_error());
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_update_subject_partial() {
        let app = test_app().await;
        let created = add_math(&app).await;

        let response = send(
            &app,
            "PUT",
            "/subjects/update",
            Some(json!({ "id": 1, "color": "red" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["color"], "red");
        assert_eq!(updated["label"], created["label"]);
        assert_eq!(updated["archived"], created["archived"]);
        assert_eq!(updated["ts"], created["ts"]);
    }

    #[tokio::test]
    async fn test_update_missing_subject_is_404() {
        let app = test_app().await;

        let response = send(
            &app,
            "PUT",
            "/subjects/update",
            Some(json!({ "id": 3, "color": "red" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_subject_archive() {
        let app = test_app().await;
        let created = add_math(&app).await;

        let response = send(&app, "PATCH", "/subjects/1/archive", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let toggled = body_json(response).await;
        assert_eq!(toggled["archived"], true);
        assert_eq!(toggled["id"], created["id"]);
        assert_eq!(toggled["ts"], created["ts"]);
    }

    #[tokio::test]
    async fn test_schedule_scenario() {
        let app = test_app().await;
        add_math(&app).await;

        let task = add_monday_task(&app, 1).await;
        assert_eq!(task["id"], 1);
        assert_eq!(task["subject_id"], 1);
        assert_eq!(task["day"], "monday");
        assert_eq!(task["description"], Value::Null);
        assert_eq!(task["archived"], false);
        assert_eq!(task["subject"]["id"], 1);
        assert_eq!(task["subject"]["label"], "Math");

        let response = send(&app, "DELETE", "/subjects/delete/1", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Internal Server Error" })
        );

        let response = send(&app, "GET", "/subjects/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let tasks = body_json(send(&app, "GET", "/tasks", None).await).await;
        assert_eq!(tasks.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_task_for_missing_subject_fails() {
        let app = test_app().await;

        let response = send(
            &app,
            "POST",
            "/tasks/add",
            Some(json!({
                "subject_id": 8,
                "day": "tuesday",
                "start_time": "09:00",
                "end_time": "10:00"
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_update_task_clears_description() {
        let app = test_app().await;
        add_math(&app).await;
        add_monday_task(&app, 1).await;

        let response = send(
            &app,
            "PUT",
            "/tasks/update",
            Some(json!({ "id": 1, "description": "Room 12", "day": "friday" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["description"], "Room 12");
        assert_eq!(updated["day"], "friday");
        assert_eq!(updated["start_time"], "09:00");

        let response = send(
            &app,
            "PUT",
            "/tasks/update",
            Some(json!({ "id": 1, "description": null })),
        )
        .await;
        let cleared = body_json(response).await;
        assert_eq!(cleared["description"], Value::Null);
        assert_eq!(cleared["day"], "friday");
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let app = test_app().await;
        add_math(&app).await;
        let created = add_monday_task(&app, 1).await;

        let response = send(&app, "GET", "/tasks/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);

        let toggled = body_json(send(&app, "PATCH", "/tasks/1/archive", None).await).await;
        assert_eq!(toggled["archived"], true);
        assert_eq!(toggled["id"], 1);

        let response = send(&app, "DELETE", "/tasks/delete/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(true));

        assert_eq!(
            send(&app, "GET", "/tasks/1", None).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&app, "DELETE", "/tasks/delete/1", None).await.status(),
            StatusCode::NOT_FOUND
        );

        let response = send(&app, "DELETE", "/subjects/delete/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(true));
    }
}
