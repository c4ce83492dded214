//! Response wrapper for rendered feeds.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Content type of every rendered feed.
pub const XML_CONTENT_TYPE: &str = "text/xml";

/// A rendered XML document returned with `200 OK` and `Content-Type: text/xml`.
///
/// # Example
///
/// ```
/// use erwait_service_shared::XmlResponse;
///
/// let response = XmlResponse::new(r#"<?xml version="1.0" encoding="UTF-8"?><rss/>"#);
/// assert_eq!(response.content_type(), "text/xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlResponse {
    body: String,
}

impl XmlResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> &'static str {
        XML_CONTENT_TYPE
    }
}

impl IntoResponse for XmlResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE)),
                (
                    header::VARY,
                    HeaderValue::from_static("Accept-Encoding, User-Agent"),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_response_headers() {
        let response = XmlResponse::new("<rss/>").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/xml");
        assert!(response.headers().contains_key(header::VARY));
    }

    #[test]
    fn test_xml_response_keeps_body() {
        let response = XmlResponse::new("<rss/>");
        assert_eq!(response.body(), "<rss/>");
    }
}
