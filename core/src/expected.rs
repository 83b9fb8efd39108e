//! Expected status code paired with a body validator.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;

use crate::validate::{Checker, Issue, PathSegment, Validate, ValidationError};

type BodyValidator<A> = Arc<dyn Fn(&str) -> Result<A, ValidationError> + Send + Sync>;

/// What a successful exchange looks like: a status and a way to turn the
/// body text into `A`.
pub struct ExpectedResponse<A> {
    status: u16,
    validator: BodyValidator<A>,
}

impl<A> Clone for ExpectedResponse<A> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<A> fmt::Debug for ExpectedResponse<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectedResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<A> ExpectedResponse<A> {
    /// Use any validator. The closure must be total: every input yields a
    /// value or a non-empty issue list.
    pub fn custom<F>(status: u16, validator: F) -> Self
    where
        F: Fn(&str) -> Result<A, ValidationError> + Send + Sync + 'static,
    {
        Self {
            status,
            validator: Arc::new(validator),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn validate(&self, body: &str) -> Result<A, ValidationError> {
        (self.validator)(body)
    }
}

impl ExpectedResponse<()> {
    /// Only the status matters; any body (or none) is accepted.
    pub fn blank(status: u16) -> Self {
        Self::custom(status, |_| Ok(()))
    }
}

impl ExpectedResponse<String> {
    /// The body must match `pattern`; the text itself is the value.
    pub fn text(status: u16, pattern: Regex) -> Self {
        Self::custom(status, move |body| {
            if pattern.is_match(body) {
                Ok(body.to_string())
            } else {
                Err(ValidationError::single(Issue::new(format!(
                    "Invalid text: does not match /{}/",
                    pattern.as_str()
                ))))
            }
        })
    }
}

impl<A> ExpectedResponse<A>
where
    A: DeserializeOwned + Validate + 'static,
{
    /// The body must be JSON that deserializes into `A` and passes its checks.
    pub fn json(status: u16) -> Self {
        Self::custom(status, parse_json::<A>)
    }
}

fn parse_json<A: DeserializeOwned + Validate>(body: &str) -> Result<A, ValidationError> {
    let document: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| ValidationError::single(Issue::new("Body was not JSON")))?;
    let value: A = serde_path_to_error::deserialize(document)
        .map_err(|err| ValidationError::single(shape_issue(err)))?;
    let mut check = Checker::new();
    value.validate(&mut check);
    check.finish()?;
    Ok(value)
}

/// Locate a deserialization error in the document. Serde reports a missing
/// field against the object that lacks it, so the field name is appended.
fn shape_issue(err: serde_path_to_error::Error<serde_json::Error>) -> Issue {
    let mut path: Vec<PathSegment> = err
        .path()
        .iter()
        .filter_map(|segment| match segment {
            Segment::Seq { index } => Some(PathSegment::Index(*index)),
            Segment::Map { key } => Some(PathSegment::Key(key.clone())),
            Segment::Enum { variant } => Some(PathSegment::Key(variant.clone())),
            Segment::Unknown => None,
        })
        .collect();
    let message = err.into_inner().to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'));
    match missing {
        Some(field) => {
            path.push(PathSegment::Key(field.to_string()));
            Issue::at(path, "Required")
        }
        None => Issue::at(path, message),
    }
}
