//! Atom document hydration and rendering.
//!
//! Stored entry bodies are parsed only here, once per returned row. The
//! pagination engine never looks inside them.

use std::str::FromStr;

use atom_syndication::{Entry as AtomEntry, Feed as AtomFeed, Link as AtomLink};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{DocumentError, Error};
use crate::feed::Page;
use crate::types::Entry;
use crate::Result;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Parse a stored entry body and stamp it with the stored update time.
pub fn hydrate_entry(entry: &Entry) -> Result<AtomEntry> {
    let body = strip_xml_declaration(entry.body.trim_start());
    let wrapped = format!("<feed xmlns=\"{}\">{}</feed>", ATOM_NAMESPACE, body);

    let feed = AtomFeed::from_str(&wrapped).map_err(|e| {
        Error::Document(DocumentError::Parse {
            id: entry.id.to_string(),
            message: e.to_string(),
        })
    })?;

    let mut hydrated = feed
        .entries()
        .first()
        .cloned()
        .ok_or_else(|| DocumentError::MissingEntry {
            id: entry.id.to_string(),
        })?;

    hydrated.set_updated(entry.updated_at.fixed_offset());
    Ok(hydrated)
}

/// Render a page as an Atom feed document.
///
/// A non-empty page gets a fresh `urn:uuid:` id and the feed name as its
/// title. Links keep their page order.
pub fn render_page(page: &Page) -> Result<AtomFeed> {
    let mut feed = AtomFeed::default();

    if let Some(newest) = page.newest() {
        feed.set_id(format!("urn:uuid:{}", Uuid::new_v4()));
        feed.set_title(page.feed.as_str());
        feed.set_updated(newest.updated_at.fixed_offset());
    } else {
        feed.set_updated(Utc::now().fixed_offset());
    }

    feed.set_links(
        page.links
            .iter()
            .map(|link| {
                let mut atom_link = AtomLink::default();
                atom_link.set_href(link.href.as_str());
                atom_link.set_rel(link.rel.as_str());
                atom_link
            })
            .collect::<Vec<_>>(),
    );

    let entries = page
        .entries
        .iter()
        .map(hydrate_entry)
        .collect::<Result<Vec<_>>>()?;
    feed.set_entries(entries);

    Ok(feed)
}

fn strip_xml_declaration(body: &str) -> &str {
    if body.starts_with("<?xml") {
        body.find("?>")
            .map(|end| body[end + 2..].trim_start())
            .unwrap_or(body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Link, Relation};
    use crate::types::{EntryId, FeedName};
    use chrono::{TimeZone, Utc};

    fn stored(id: &str, body: &str) -> Entry {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Entry {
            id: EntryId::new(id).unwrap(),
            feed: FeedName::new("test").unwrap(),
            created_at: at,
            updated_at: at,
            categories: Vec::new(),
            body: body.to_string(),
        }
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<entry xmlns="http://www.w3.org/2005/Atom">
  <id>urn:uuid:1</id>
  <title>hello</title>
  <updated>2001-01-01T00:00:00Z</updated>
</entry>"#;

    #[test]
    fn hydration_overwrites_updated() {
        let entry = stored("urn:uuid:1", BODY);
        let hydrated = hydrate_entry(&entry).unwrap();

        assert_eq!(hydrated.id(), "urn:uuid:1");
        assert_eq!(hydrated.title().as_str(), "hello");
        assert_eq!(hydrated.updated().to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn body_without_entry_is_rejected() {
        let entry = stored("urn:uuid:2", "<title>not an entry</title>");
        let err = hydrate_entry(&entry).unwrap_err();
        assert!(matches!(
            err,
            Error::Document(DocumentError::MissingEntry { .. })
        ));
    }

    #[test]
    fn renders_links_and_entries() {
        let page = Page {
            feed: FeedName::new("test").unwrap(),
            entries: vec![stored("urn:uuid:1", BODY)],
            links: vec![
                Link::new(Relation::Current, "http://localhost/test"),
                Link::new(Relation::SelfLink, "http://localhost/test"),
            ],
        };

        let feed = render_page(&page).unwrap();
        assert_eq!(feed.title().as_str(), "test");
        assert!(feed.id().starts_with("urn:uuid:"));
        assert_eq!(feed.entries().len(), 1);
        assert_eq!(feed.links()[1].rel(), "self");

        let xml = feed.to_string();
        assert!(xml.contains("rel=\"current\""));
    }

    #[test]
    fn empty_page_has_no_title() {
        let page = Page {
            feed: FeedName::new("test").unwrap(),
            entries: Vec::new(),
            links: Vec::new(),
        };
        let feed = render_page(&page).unwrap();
        assert!(feed.title().as_str().is_empty());
        assert!(feed.entries().is_empty());
    }
}
