//! Exchange executor: one request in, one `Outcome` out.
//!
//! # Design
//! `execute` is the only place that talks to the transport. It sends once,
//! reads the body text once, releases the response, and then hands the
//! pieces to `classify`, which is pure. The status check always runs before
//! the validator, so a wrong status never reaches body parsing.

use tracing::debug;

use crate::expected::ExpectedResponse;
use crate::http::{Request, Response, ResponseHead};
use crate::outcome::Outcome;
use crate::transport::{Transport, TransportResponse};

/// Send `request` through `transport` and classify the result against
/// `expected`.
///
/// Never fails: transport errors become `Outcome::NoResponse`, and a body
/// that cannot be read is treated as empty text.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(method = %request.method, url = %request.url, expected_status = expected.status())
)]
pub async fn execute<T, A>(
    transport: &T,
    request: Request,
    expected: &ExpectedResponse<A>,
) -> Outcome<A>
where
    T: Transport,
{
    let mut response = match transport.send(&request).await {
        Ok(response) => response,
        Err(error) => {
            debug!(error = %error, "no response received");
            return Outcome::NoResponse { request, error };
        }
    };

    let head = ResponseHead {
        url: response.url().to_string(),
        status: response.status(),
        headers: response.headers(),
    };
    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            debug!(error = %error, "failed to read response body, using empty text");
            String::new()
        }
    };
    response.dispose().await;

    classify(request, head, body, expected)
}

/// Classify an already received response. Pure; the validator only runs
/// when the status matches.
pub fn classify<A>(
    request: Request,
    head: ResponseHead,
    body: String,
    expected: &ExpectedResponse<A>,
) -> Outcome<A> {
    let expected_status = expected.status();
    if head.status != expected_status {
        debug!(actual = head.status, expected = expected_status, "wrong status");
        let actual_status = head.status;
        return Outcome::WrongStatus {
            request,
            response: Response { head, body },
            actual_status,
            expected_status,
        };
    }

    match expected.validate(&body) {
        Ok(value) => {
            debug!(status = head.status, "valid");
            Outcome::Valid {
                request,
                response: Response { head, body: value },
            }
        }
        Err(error) => {
            debug!(issues = error.issues().len(), "invalid body");
            Outcome::InvalidBody {
                request,
                response: Response { head, body },
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::outcome::OutcomeKind;
    use crate::validate::{Issue, ValidationError};

    fn head(status: u16) -> ResponseHead {
        ResponseHead {
            url: "http://localhost/users/1".into(),
            status,
            headers: BTreeMap::new(),
        }
    }

    #[test]
    fn status_mismatch_skips_validator() {
        let expected = ExpectedResponse::<()>::custom(200, |_| panic!("validator must not run"));
        let outcome = classify(Request::put("/users/11"), head(404), "{}".into(), &expected);
        match outcome {
            Outcome::WrongStatus {
                actual_status,
                expected_status,
                response,
                ..
            } => {
                assert_eq!(actual_status, 404);
                assert_eq!(expected_status, 200);
                assert_eq!(response.body, "{}");
            }
            other => panic!("expected WrongStatus, got {:?}", other.kind()),
        }
    }

    #[test]
    fn validator_issues_are_kept_in_order() {
        let issues = vec![
            Issue::at(vec!["b".into()], "second field first"),
            Issue::at(vec!["a".into()], "first field second"),
        ];
        let returned = issues.clone();
        let expected = ExpectedResponse::<()>::custom(200, move |_| {
            Err(ValidationError::from_issues(returned.clone()).unwrap())
        });
        let outcome = classify(Request::get("/x"), head(200), "{}".into(), &expected);
        match outcome {
            Outcome::InvalidBody { error, .. } => assert_eq!(error.issues(), issues.as_slice()),
            other => panic!("expected InvalidBody, got {:?}", other.kind()),
        }
    }

    #[test]
    fn validated_value_is_carried() {
        let expected = ExpectedResponse::custom(201, |body: &str| Ok(body.len()));
        let outcome = classify(Request::post("/users"), head(201), "abcd".into(), &expected);
        assert_eq!(outcome.kind(), OutcomeKind::Valid);
        assert_eq!(outcome.into_body(), Some(4));
    }
}
