use axum::{
    body::{Body, HttpBody, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

// 超过 4KB 或长度未知的错误响应体不读取，原样返回
const MAX_LOGGED_BODY: usize = 4096;

pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    if !response.status().is_server_error() {
        return response;
    }

    let loggable = matches!(
        response.body().size_hint().upper(),
        Some(len) if len <= MAX_LOGGED_BODY as u64
    );
    if !loggable {
        error!(
            "Server error on {} - Status: {}, Body not logged",
            path,
            response.status()
        );
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body for {}: {}", path, e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        "Server error on {} - Status: {}, Body: {}",
        path,
        parts.status,
        String::from_utf8_lossy(&bytes)
    );

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
