//! Uniform `{code, message, data}` envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as _;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::shared::{AppError, ErrorKind, PaginatedResult};

const SUCCESS_MESSAGE: &str = "success";

/// Every response body, success or failure, has this shape.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `0` on success, otherwise the error code
    pub code: u32,
    pub message: String,
    /// Payload; `null` on most failures
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorKind::Success.code(),
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn ok() -> Self {
        Self {
            code: ErrorKind::Success.code(),
            message: SUCCESS_MESSAGE.to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Page payload: `{list, total, page, size}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageData<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T, U: Into<T>> From<PaginatedResult<U>> for PageData<T> {
    fn from(page: PaginatedResult<U>) -> Self {
        Self {
            list: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            size: page.page_size,
        }
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Success => StatusCode::OK,
        ErrorKind::InvalidParam | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized | ErrorKind::InvalidToken | ErrorKind::TokenExpired => {
            StatusCode::UNAUTHORIZED
        }
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::InternalError
        | ErrorKind::DatabaseError
        | ErrorKind::CacheError
        | ErrorKind::ServiceError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders the kind and message only. The cause goes to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        let cause = self.source().map(|e| e.to_string());

        if status.is_server_error() {
            error!(code = self.code(), cause = ?cause, "{}", self.message());
        } else {
            debug!(code = self.code(), cause = ?cause, "{}", self.message());
        }

        let body = ApiResponse::<Value> {
            code: self.code(),
            message: self.message().to_string(),
            data: self.data().cloned(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PageInfo;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn every_kind_maps_to_its_status_class() {
        assert_eq!(status_for(ErrorKind::InvalidRequest), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::AlreadyExists), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::CacheError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn error_body_hides_the_cause() {
        let err = AppError::database(sea_orm::DbErr::Custom("password=hunter2".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        assert_eq!(body["code"], 5001);
        assert_eq!(body["message"], "database operation failed");
        assert!(body["data"].is_null());
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn error_payload_is_rendered_as_data() {
        let err = AppError::invalid_param("bad page")
            .with_data(serde_json::json!({ "field": "page" }));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["data"]["field"], "page");
    }

    #[test]
    fn page_payload_uses_list_and_size() {
        let page = PaginatedResult::new(vec![1u8, 2], 7, PageInfo::normalize(2, 2));
        let data: PageData<u8> = page.into();
        let json = serde_json::to_value(ApiResponse::success(data)).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"]["list"], serde_json::json!([1, 2]));
        assert_eq!(json["data"]["total"], 7);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["size"], 2);
    }
}
