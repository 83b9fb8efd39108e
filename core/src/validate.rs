//! Structured validation issues and field checks.
//!
//! # Design
//! A validator turns raw body text into a typed value or a non-empty, ordered
//! list of `Issue`s. Deserialization is done by serde; types that need more
//! than their shape checked (positive ids, email format, ...) implement
//! `Validate` and report through a `Checker`, which tracks the field path so
//! issues read like `Invalid email at "[3].email"`.

use std::fmt;

use thiserror::Error;

/// One step in the path from the document root to the offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Render a path as `address.geo.lat` or `[3].email`.
pub fn join_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Issue {
    /// An issue about the document as a whole.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn at(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at \"{}\"", self.message, join_path(&self.path))
        }
    }
}

/// Non-empty, ordered list of issues produced by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    issues: Vec<Issue>,
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// `None` when there is nothing to report.
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

/// Field-level checks beyond what deserialization enforces.
pub trait Validate {
    fn validate(&self, check: &mut Checker);
}

/// Collects issues while walking a value, keeping track of the current path.
#[derive(Debug, Default)]
pub struct Checker {
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` at the current path unless `ok` holds.
    pub fn ensure(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.issues.push(Issue::at(self.path.clone(), message));
        }
        self
    }

    /// Record `message` at the child `name` unless `ok` holds.
    pub fn require(&mut self, name: &str, ok: bool, message: impl Into<String>) -> &mut Self {
        self.scoped(PathSegment::from(name), |check| {
            check.ensure(ok, message);
        })
    }

    /// Validate a nested value under the child `name`.
    pub fn field<T: Validate + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        self.scoped(PathSegment::from(name), |check| value.validate(check))
    }

    pub fn scoped(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.path.push(segment);
        f(self);
        self.path.pop();
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        match ValidationError::from_issues(self.issues) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self, check: &mut Checker) {
        for (index, item) in self.iter().enumerate() {
            check.scoped(PathSegment::Index(index), |check| item.validate(check));
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, check: &mut Checker) {
        self.as_slice().validate(check);
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, check: &mut Checker) {
        if let Some(value) = self {
            value.validate(check);
        }
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self, check: &mut Checker) {
        (**self).validate(check);
    }
}

macro_rules! shape_only {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self, _check: &mut Checker) {}
            }
        )*
    };
}

shape_only!(
    (),
    bool,
    String,
    str,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    serde_json::Value,
);

#[cfg(test)]
mod tests {
    use super::*;

    struct Geo {
        lat: String,
    }

    impl Validate for Geo {
        fn validate(&self, check: &mut Checker) {
            check.require("lat", self.lat.parse::<f64>().is_ok(), "Expected a coordinate");
        }
    }

    struct Person {
        id: i64,
        email: String,
        geo: Geo,
    }

    impl Validate for Person {
        fn validate(&self, check: &mut Checker) {
            check
                .require("id", self.id > 0, "Number must be greater than 0")
                .require("email", self.email.contains('@'), "Invalid email")
                .field("geo", &self.geo);
        }
    }

    fn person(id: i64, email: &str, lat: &str) -> Person {
        Person {
            id,
            email: email.to_string(),
            geo: Geo {
                lat: lat.to_string(),
            },
        }
    }

    #[test]
    fn valid_value_finishes_ok() {
        let mut check = Checker::new();
        person(1, "a@b.c", "-37.3159").validate(&mut check);
        assert!(check.finish().is_ok());
    }

    #[test]
    fn issues_keep_walk_order_and_paths() {
        let people = vec![person(1, "a@b.c", "1.0"), person(0, "nope", "x")];
        let mut check = Checker::new();
        people.validate(&mut check);
        let err = check.finish().unwrap_err();
        let rendered: Vec<String> = err.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Number must be greater than 0 at \"[1].id\"",
                "Invalid email at \"[1].email\"",
                "Expected a coordinate at \"[1].geo.lat\"",
            ]
        );
    }

    #[test]
    fn root_issue_has_no_path_suffix() {
        assert_eq!(Issue::new("Body was not JSON").to_string(), "Body was not JSON");
    }

    #[test]
    fn empty_issue_list_is_not_an_error() {
        assert!(ValidationError::from_issues(Vec::new()).is_none());
    }

    #[test]
    fn error_display_joins_issues() {
        let err = ValidationError::from_issues(vec![
            Issue::at(vec!["name".into()], "Required"),
            Issue::new("Too short"),
        ])
        .unwrap();
        assert_eq!(err.to_string(), "Required at \"name\"; Too short");
    }

    #[test]
    fn join_path_mixes_keys_and_indices() {
        let path = vec![
            PathSegment::Index(0),
            "address".into(),
            "geo".into(),
            PathSegment::Index(2),
        ];
        assert_eq!(join_path(&path), "[0].address.geo[2]");
    }
}
