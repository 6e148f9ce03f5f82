//! HTTP response wrapping of rendered documents.

use crate::generator::Document;

/// A rendered sitemap ready to be served.
///
/// With the `axum` feature it can be returned straight from a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapResponse {
    /// HTTP status code (always 200 for rendered documents).
    pub status: u16,
    /// `Content-Type` header value.
    pub content_type: String,
    pub body: String,
}

impl SitemapResponse {
    /// `200 OK` response carrying `document`.
    #[must_use]
    pub fn ok(document: Document) -> Self {
        Self {
            status: 200,
            content_type: document.content_type,
            body: document.content,
        }
    }

    /// Response headers as name/value pairs.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![("Content-Type", self.content_type.as_str())]
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for SitemapResponse {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{StatusCode, header};

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response() -> SitemapResponse {
        SitemapResponse::ok(Document {
            content: "<urlset/>".to_owned(),
            content_type: "text/xml; charset=utf-8".to_owned(),
        })
    }

    #[test]
    fn test_ok() {
        let response = response();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<urlset/>");
        assert_eq!(
            response.headers(),
            vec![("Content-Type", "text/xml; charset=utf-8")]
        );
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_axum_response() {
        use axum::http::header;
        use axum::response::IntoResponse;

        let response = response().into_response();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/xml; charset=utf-8"
        );
    }
}
