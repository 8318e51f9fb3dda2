use axum::{Router, body::Body, http::header::CONTENT_TYPE, response::Response, routing::get};

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener
        .local_addr()
        .expect("Could not get test listener address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server stopped unexpectedly");
    });

    format!("http://{address}")
}

/// Serve `body` as JSON at `/data.json` and return the full URL.
pub(crate) async fn serve_json_fixture(body: String) -> String {
    let router = Router::new().route(
        "/data.json",
        get(move || async move { ([(CONTENT_TYPE, "application/json")], body) }),
    );

    format!("{}/data.json", serve_router(router).await)
}
