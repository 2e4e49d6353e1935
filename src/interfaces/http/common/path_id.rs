use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::shared::AppError;

/// Numeric `{id}` path segment. Anything that is not a positive integer is
/// rejected as `InvalidParam("invalid id")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for PathId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_param("invalid id"))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PathId(id)),
            _ => Err(AppError::invalid_param("invalid id")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn echo(PathId(id): PathId) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn rejects_non_numeric_and_non_positive_ids() {
        let app = Router::new().route("/items/{id}", get(echo));
        for (uri, status) in [
            ("/items/42", StatusCode::OK),
            ("/items/abc", StatusCode::BAD_REQUEST),
            ("/items/0", StatusCode::BAD_REQUEST),
            ("/items/-1", StatusCode::BAD_REQUEST),
        ] {
            let resp = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), status, "{uri}");
        }
    }
}
