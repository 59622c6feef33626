//! Page traversal direction.

use std::fmt;
use std::str::FromStr;

use crate::error::{BadRequestError, Error};

/// Traversal sense relative to a marker.
///
/// `Forward` walks toward newer entries, `Backward` toward older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDirection {
    Forward,
    Backward,
}

impl PageDirection {
    /// Returns the query-string token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageDirection::Forward => "forward",
            PageDirection::Backward => "backward",
        }
    }

    /// Parse an optional direction token supplied alongside a marker.
    ///
    /// A missing token is as invalid as an unknown one.
    pub fn from_token(token: Option<&str>) -> Result<Self, Error> {
        match token {
            Some(token) => token.parse(),
            None => Err(BadRequestError::InvalidDirection.into()),
        }
    }
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("forward") {
            Ok(PageDirection::Forward)
        } else if s.trim().eq_ignore_ascii_case("backward") {
            Ok(PageDirection::Backward)
        } else {
            Err(BadRequestError::InvalidDirection.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("forward".parse::<PageDirection>().unwrap(), PageDirection::Forward);
        assert_eq!("BACKWARD".parse::<PageDirection>().unwrap(), PageDirection::Backward);
        assert_eq!("Forward".parse::<PageDirection>().unwrap(), PageDirection::Forward);
    }

    #[test]
    fn rejects_unknown_token() {
        let err = "sideways".parse::<PageDirection>().unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn missing_token_is_invalid() {
        assert!(PageDirection::from_token(None).unwrap_err().is_bad_request());
        assert_eq!(
            PageDirection::from_token(Some("backward")).unwrap(),
            PageDirection::Backward
        );
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(PageDirection::Forward.to_string(), "forward");
        assert_eq!(PageDirection::Backward.to_string(), "backward");
    }
}
