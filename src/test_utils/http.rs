use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    let status = response.status();
    assert_eq!(status, StatusCode::OK, "expected 200 OK but got {status}");
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    match response.headers().get(header_name) {
        Some(value) => value
            .to_str()
            .unwrap_or_else(|_| panic!("header {header_name} is not valid UTF-8"))
            .to_owned(),
        None => panic!("response is missing the {header_name} header"),
    }
}
