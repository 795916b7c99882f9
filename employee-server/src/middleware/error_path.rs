//! Adds the request path to JSON error bodies
//!
//! [`AppError`](crate::AppError) renders without a path since it never sees
//! the request. Its response carries the [`ErrorBody`] in the extensions;
//! this middleware re-renders that body with `path` set.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use http::header;

use crate::utils::ErrorBody;

pub async fn error_path_middleware(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    let Some(mut error) = response.extensions().get::<ErrorBody>().cloned() else {
        return response;
    };
    error.path = Some(path);

    let Ok(bytes) = serde_json::to_vec(&error) else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.extensions.remove::<ErrorBody>();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
