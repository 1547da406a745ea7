//! The 500 page, shown when a request fails for a reason the user cannot fix
//! from the form they submitted.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page explaining what went wrong with the server and what to do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalServerError {
    /// A short summary of the problem.
    pub description: String,
    /// What the user, or whoever runs the server, can do next.
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }
}

impl InternalServerError {
    /// The budget could not be read because a request panicked while updating it.
    pub fn budget_unavailable() -> Self {
        Self {
            description: "Your budget is unavailable".to_owned(),
            fix: "A previous request failed while updating your accounts. \
                Restart the server and check the server logs."
                .to_owned(),
        }
    }

    /// The server was started with a timezone that could not be resolved.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self {
            description: "Invalid Timezone Settings".to_owned(),
            fix: format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
        }
    }

    fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", &self.description, &self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// Route handler for the generic 500 page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        internal_server_error::{InternalServerError, get_internal_server_error_page},
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn page_is_a_server_error() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Sorry, something went wrong."));
    }

    #[tokio::test]
    async fn invalid_timezone_names_the_timezone() {
        let response = InternalServerError::invalid_timezone("Mars/Olympus").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Invalid Timezone Settings"));
        assert!(text.contains("Mars/Olympus"), "got page text {text:?}");
    }
}
