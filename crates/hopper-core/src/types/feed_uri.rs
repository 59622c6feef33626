//! Feed base URI type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{BadRequestError, Error};
use crate::types::FeedName;

/// The absolute base URI of a feed, without query string.
///
/// Navigation links are built by appending a query string to this value,
/// so the stored form never ends with a slash.
///
/// # Example
///
/// ```
/// use hopper_core::{FeedName, FeedUri};
///
/// let root = FeedUri::new("http://localhost:8080/").unwrap();
/// let feed = root.join_feed(&FeedName::new("namespace/feed").unwrap());
/// assert_eq!(feed.as_str(), "http://localhost:8080/namespace/feed");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeedUri(String);

impl FeedUri {
    /// Create a feed URI from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is not absolute HTTP(S), or if it
    /// already carries a query string or fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| -> Error {
            BadRequestError::InvalidInput {
                kind: "feed URI",
                value: s.to_string(),
                reason,
            }
            .into()
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("must use http or https".to_string()));
        }
        if url.host_str().is_none() {
            return Err(invalid("must have a host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(
                "must not carry a query string or fragment".to_string(),
            ));
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }

    /// Returns the URI for a feed below this base.
    pub fn join_feed(&self, feed: &FeedName) -> FeedUri {
        FeedUri(format!("{}/{}", self.0, feed.as_str()))
    }

    /// Returns the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FeedUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for FeedUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FeedUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FeedUri::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for FeedUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
