//! Plain-text failure reports.
//!
//! # Design
//! `render` is a pure function of an `Outcome`. Every report carries the
//! full request and, when there was one, the full response, so a failing
//! test can be diagnosed without running it again. Sections use fixed
//! markers (`# REQUEST`, `# RESPONSE`, `===` fences) and JSON is printed
//! with two-space indentation. Nothing in here can fail: anything that does
//! not serialize falls back to its raw or debug form.

use serde::Serialize;

use crate::http::{Request, Response};
use crate::outcome::Outcome;

/// First line of every report, naming the check that was made.
pub const TITLE: &str = "expect(exchange).toBeValid()";

const NO_RESPONSE: &str = "No Response was received";
const FENCE: &str = "===";

/// Render the report for `outcome`.
pub fn render<A>(outcome: &Outcome<A>) -> String {
    let mut lines: Vec<String> = vec![TITLE.to_string()];
    match outcome {
        Outcome::Valid { .. } => {
            lines.extend(["Valid".to_string(), String::new(), "Pass".to_string()]);
        }
        Outcome::NoResponse { request, error } => {
            lines.push(String::new());
            lines.push(format!("NoResponse: {NO_RESPONSE}"));
            lines.push(format!("Error: {}", error.describe()));
            request_section(&mut lines, request);
            lines.push(String::new());
            lines.push("# RESPONSE".to_string());
            lines.push(NO_RESPONSE.to_string());
        }
        Outcome::WrongStatus {
            request,
            response,
            actual_status,
            expected_status,
        } => {
            lines.push(String::new());
            lines.push("WrongStatus:".to_string());
            lines.push(format!("Expected status: {expected_status}"));
            lines.push(format!("Actual status: {actual_status}"));
            request_section(&mut lines, request);
            response_section(&mut lines, response);
        }
        Outcome::InvalidBody {
            request,
            response,
            error,
        } => {
            lines.push(String::new());
            lines.push("InvalidBody:".to_string());
            lines.extend(error.issues().iter().map(|issue| format!("- {issue}")));
            request_section(&mut lines, request);
            response_section(&mut lines, response);
        }
    }
    lines.join("\n")
}

fn request_section(lines: &mut Vec<String>, request: &Request) {
    lines.push(String::new());
    lines.push("# REQUEST".to_string());
    lines.push(request.label());
    lines.push("Options:".to_string());
    fenced(lines, pretty(&request.options));
}

fn response_section(lines: &mut Vec<String>, response: &Response<String>) {
    lines.push(String::new());
    lines.push("# RESPONSE".to_string());
    lines.push(format!("Url: {}", response.head.url));
    lines.push("Body:".to_string());
    fenced(lines, pretty_body(&response.body));
    lines.push("Headers:".to_string());
    fenced(lines, pretty(&response.head.headers));
}

fn fenced(lines: &mut Vec<String>, content: String) {
    lines.push(FENCE.to_string());
    lines.push(content);
    lines.push(FENCE.to_string());
}

fn pretty<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:#?}"))
}

/// Pretty-print `body` if it is JSON, otherwise return it untouched.
pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::TransportError;
    use crate::http::ResponseHead;
    use crate::validate::{Issue, ValidationError};

    fn response(status: u16, body: &str) -> Response<String> {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Response {
            head: ResponseHead {
                url: "http://localhost:3000/users/11".into(),
                status,
                headers,
            },
            body: body.to_string(),
        }
    }

    #[test]
    fn wrong_status_report() {
        let outcome: Outcome<()> = Outcome::WrongStatus {
            request: Request::put("/users/11")
                .with_json(&serde_json::json!({ "name": "Ervin" }))
                .unwrap(),
            response: response(404, "{\"error\":\"not found\"}"),
            actual_status: 404,
            expected_status: 200,
        };
        let expected = [
            TITLE,
            "",
            "WrongStatus:",
            "Expected status: 200",
            "Actual status: 404",
            "",
            "# REQUEST",
            "PUT /users/11",
            "Options:",
            "===",
            "{\n  \"data\": {\n    \"name\": \"Ervin\"\n  }\n}",
            "===",
            "",
            "# RESPONSE",
            "Url: http://localhost:3000/users/11",
            "Body:",
            "===",
            "{\n  \"error\": \"not found\"\n}",
            "===",
            "Headers:",
            "===",
            "{\n  \"content-type\": \"application/json\"\n}",
            "===",
        ]
        .join("\n");
        assert_eq!(render(&outcome), expected);
    }

    #[test]
    fn invalid_body_lists_issues_and_keeps_raw_text() {
        let outcome: Outcome<()> = Outcome::InvalidBody {
            request: Request::get("/users"),
            response: response(200, "not json"),
            error: ValidationError::from_issues(vec![
                Issue::new("Body was not JSON"),
                Issue::at(vec![0.into(), "email".into()], "Invalid email"),
            ])
            .unwrap(),
        };
        let report = render(&outcome);
        let expected_head = [
            TITLE,
            "",
            "InvalidBody:",
            "- Body was not JSON",
            "- Invalid email at \"[0].email\"",
            "",
            "# REQUEST",
            "GET /users",
            "Options:",
            "===",
            "{}",
            "===",
        ]
        .join("\n");
        assert!(report.starts_with(&expected_head), "{report}");
        assert!(report.contains("Body:\n===\nnot json\n==="), "{report}");
    }

    #[test]
    fn no_response_report_has_no_response_details() {
        let outcome: Outcome<()> = Outcome::NoResponse {
            request: Request::delete("/users/1"),
            error: TransportError::new("connection refused"),
        };
        let expected = [
            TITLE,
            "",
            "NoResponse: No Response was received",
            "Error: connection refused",
            "",
            "# REQUEST",
            "DELETE /users/1",
            "Options:",
            "===",
            "{}",
            "===",
            "",
            "# RESPONSE",
            "No Response was received",
        ]
        .join("\n");
        let report = render(&outcome);
        assert_eq!(report, expected);
        assert!(!report.contains("Url:"));
    }

    #[test]
    fn valid_report_is_a_pass() {
        let outcome = Outcome::Valid {
            request: Request::get("/users/1"),
            response: response(200, "{}").map_body(|_| 1),
        };
        assert_eq!(render(&outcome), format!("{TITLE}\nValid\n\nPass"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let outcome: Outcome<()> = Outcome::WrongStatus {
            request: Request::get("/users").with_header("b", "2").with_header("a", "1"),
            response: response(500, "oops"),
            actual_status: 500,
            expected_status: 200,
        };
        assert_eq!(render(&outcome), render(&outcome));
    }

    #[test]
    fn pretty_body_falls_back_to_raw_text() {
        assert_eq!(pretty_body(""), "");
        assert_eq!(pretty_body("<html>"), "<html>");
        assert_eq!(pretty_body("[1,2]"), "[\n  1,\n  2\n]");
    }
}
