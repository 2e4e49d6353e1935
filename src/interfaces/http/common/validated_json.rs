//! Validating extractors for Axum
//!
//! `ValidatedJson<T>` and `ValidatedQuery<T>` work like `axum::Json<T>` and
//! `axum::extract::Query<T>`, but additionally run
//! `validator::Validate::validate()` on the deserialized value. Both
//! malformed input and rule failures are rejected as `InvalidParam` (400).

use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::shared::AppError;

/// An extractor that deserializes a JSON body and validates it.
///
/// # Usage
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct LoginRequest {
///     #[validate(length(min = 3))]
///     username: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<LoginRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Query-string counterpart of [`ValidatedJson`].
pub struct ValidatedQuery<T>(pub T);

/// Joins field messages as `field: message; field: message`, sorted by field
/// so the output is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if field == "__all__" {
                    msg
                } else {
                    format!("{}: {}", field, msg)
                }
            })
        })
        .collect();

    if messages.is_empty() {
        "validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    value
        .validate()
        .map_err(|errors| AppError::invalid_param(describe(&errors)))?;
    Ok(value)
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_param(format!("invalid request body: {}", rejection.body_text()))
            })?;

        validated(value).map(ValidatedJson)
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_param(format!("invalid query: {}", rejection.body_text()))
            })?;

        validated(value).map(ValidatedQuery)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10, message = "name must be 1-10 characters"))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        age: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct TestQuery {
        #[validate(range(min = 1, max = 100))]
        page_size: Option<i64>,
    }

    async fn body_handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn query_handler(ValidatedQuery(_q): ValidatedQuery<TestQuery>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/test", post(body_handler))
            .route("/query", get(query_handler))
    }

    fn json_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    async fn message(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], 1001);
        json["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "age": 30});
        let resp = app()
            .oneshot(json_request(Body::from(serde_json::to_vec(&body).unwrap())))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_is_invalid_param() {
        let resp = app()
            .oneshot(json_request(Body::from("not json")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(message(resp).await.starts_with("invalid request body"));
    }

    #[tokio::test]
    async fn rule_failures_are_joined_by_field() {
        let body = serde_json::json!({"name": "", "age": 0});
        let resp = app()
            .oneshot(json_request(Body::from(serde_json::to_vec(&body).unwrap())))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            message(resp).await,
            "age: range; name: name must be 1-10 characters"
        );
    }

    #[tokio::test]
    async fn query_is_validated_when_supplied() {
        let ok = app()
            .oneshot(Request::get("/query").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let too_big = app()
            .oneshot(Request::get("/query?page_size=500").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(too_big.status(), StatusCode::BAD_REQUEST);

        let garbage = app()
            .oneshot(Request::get("/query?page_size=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
    }
}
