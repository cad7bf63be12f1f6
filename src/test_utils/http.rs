use axum::{
    body::Body,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use serde_json::Value;

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

pub(crate) async fn parse_json(response: Response<Body>) -> Value {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("Response body is not valid JSON")
}

/// Serve `body` as JSON from a local server and return its URL.
///
/// Use `status` to make the server respond with an error.
pub(crate) async fn serve_seed_document(status: StatusCode, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind seed server");
    let address = listener
        .local_addr()
        .expect("Could not get seed server address");
    let app = axum::Router::new().route(
        "/seed.json",
        axum::routing::get(move || async move {
            (status, [(CONTENT_TYPE, "application/json")], body)
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Seed server stopped unexpectedly");
    });

    format!("http://{address}/seed.json")
}
