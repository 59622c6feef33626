//! Page and navigation link types.

use serde::Serialize;
use std::fmt;

use crate::types::{Entry, FeedName};

/// Navigation link relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// The feed head.
    Current,
    /// The exact query that produced this page.
    #[serde(rename = "self")]
    SelfLink,
    /// Entries newer than this page.
    Previous,
    /// Entries older than this page.
    Next,
    /// The oldest page of the feed.
    Last,
}

impl Relation {
    /// Returns the protocol name of the relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Current => "current",
            Relation::SelfLink => "self",
            Relation::Previous => "previous",
            Relation::Next => "next",
            Relation::Last => "last",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: Relation,
    pub href: String,
}

impl Link {
    pub fn new(rel: Relation, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
        }
    }
}

/// One page of a feed: entries newest first, plus its links.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub feed: FeedName,
    pub entries: Vec<Entry>,
    pub links: Vec<Link>,
}

impl Page {
    /// Returns the link with the given relation, if present.
    pub fn link(&self, rel: Relation) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Returns the target of the link with the given relation, if present.
    pub fn href(&self, rel: Relation) -> Option<&str> {
        self.link(rel).map(|link| link.href.as_str())
    }

    /// The newest entry on the page.
    pub fn newest(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// The oldest entry on the page.
    pub fn oldest(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
