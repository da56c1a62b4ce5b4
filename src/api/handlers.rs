use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::AppState;
use crate::error::ErrorBody;
use crate::models::{ImageQuery, StoryRequest, StoryResponse};
use crate::Error;

pub async fn generate_story(
    State(state): State<AppState>,
    payload: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<StoryResponse>, Error> {
    let Json(request) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let story = state.story.generate_story(&request).await?;

    Ok(Json(story))
}

pub async fn image_proxy(
    State(state): State<AppState>,
    query: Result<Query<ImageQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let response = match state.images.fetch_image(&query.prompt).await {
        Some(image) => {
            tracing::info!(
                "Serving {} byte {} from {:?} tier",
                image.bytes.len(),
                image.content_type,
                image.tier
            );
            ([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    };

    Ok(response)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not found".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use crate::ai::MockStoryClient;
    use crate::api::{router, AppState};
    use crate::image::{ImageTier, MockImageService};
    use crate::models::StoryResponse;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(story: MockStoryClient, images: MockImageService) -> Router {
        router(AppState::new(Arc::new(story), Arc::new(images)))
    }

    fn generate_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_story() {
        let story = MockStoryClient::new().with_story(StoryResponse {
            title: "T".to_string(),
            content: "C".to_string(),
            next_choices: vec!["a".to_string(), "b".to_string()],
        });
        let app = test_app(story, MockImageService::new());

        let response = app
            .oneshot(generate_request(r#"{"premise":"p","genre":"g"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"title":"T","content":"C","next_choices":["a","b"]})
        );
    }

    #[tokio::test]
    async fn test_generate_passes_context_through() {
        let story = MockStoryClient::new();
        let recorder = story.clone();
        let app = test_app(story, MockImageService::new());

        app.oneshot(generate_request(
            r#"{"premise":"open the door","genre":"Horror","context":"It was dark."}"#,
        ))
        .await
        .unwrap();

        let requests = recorder.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].context(), Some("It was dark."));
    }

    #[tokio::test]
    async fn test_generate_missing_field_is_rejected_before_upstream() {
        let story = MockStoryClient::new();
        let recorder = story.clone();
        let app = test_app(story, MockImageService::new());

        let response = app
            .oneshot(generate_request(r#"{"premise":"p"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("genre"));
        assert_eq!(recorder.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_failure_returns_500_with_detail() {
        let story = MockStoryClient::new().with_failure("upstream exploded".to_string());
        let app = test_app(story, MockImageService::new());

        let response = app
            .oneshot(generate_request(r#"{"premise":"p","genre":"g"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_image_proxy_returns_bytes() {
        let images = MockImageService::new().with_image(b"jpeg-ish".to_vec(), ImageTier::Primary);
        let recorder = images.clone();
        let app = test_app(MockStoryClient::new(), images);

        let response = app
            .oneshot(get("/image-proxy?prompt=cyberpunk%20city%20at%20night"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"jpeg-ish");
        assert_eq!(recorder.get_prompts(), vec!["cyberpunk city at night".to_string()]);
    }

    #[tokio::test]
    async fn test_image_proxy_labels_png() {
        let images =
            MockImageService::new().with_image(vec![0x89, 0x50, 0x4E, 0x47], ImageTier::Secondary);
        let app = test_app(MockStoryClient::new(), images);

        let response = app.oneshot(get("/image-proxy?prompt=x")).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn test_image_proxy_not_found_has_empty_body() {
        let app = test_app(MockStoryClient::new(), MockImageService::new());

        let response = app.oneshot(get("/image-proxy?prompt=x")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_image_proxy_requires_prompt() {
        let images = MockImageService::new();
        let recorder = images.clone();
        let app = test_app(MockStoryClient::new(), images);

        let response = app.oneshot(get("/image-proxy")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(recorder.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(MockStoryClient::new(), MockImageService::new());

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let app = test_app(MockStoryClient::new(), MockImageService::new());

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let app = test_app(MockStoryClient::new(), MockImageService::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/generate")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
