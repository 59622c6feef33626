//! Navigation link construction.
//!
//! Query parameters are always composed in the order `limit`, `search`,
//! `marker`, `direction`. Existing clients compare link targets textually,
//! so that order is part of the protocol. Search and marker values are
//! form-encoded; entry ids may contain `&`, `+` or `#`.

use url::form_urlencoded;

use crate::types::{EntryId, FeedUri, PageDirection};

use super::{DEFAULT_PAGE_SIZE, FeedRequest, Link, Relation};

/// Builds the links of one page from the request that produced it.
#[derive(Debug, Clone)]
pub struct LinkBuilder<'a> {
    base: &'a FeedUri,
    page_size: u32,
    search: &'a str,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(request: &'a FeedRequest) -> Self {
        Self {
            base: request.base_uri(),
            page_size: request.page_size(),
            search: request.search(),
        }
    }

    /// The feed head: always the bare base URI.
    pub fn current(&self) -> Link {
        Link::new(Relation::Current, self.base.as_str())
    }

    /// The effective query of this page.
    ///
    /// Head requests are spelled out with `direction=backward`, except that
    /// the default head query collapses to the bare base URI.
    pub fn self_link(&self, anchor: Option<(&EntryId, PageDirection)>) -> Link {
        let href = match anchor {
            Some((marker, direction)) => self.target(Some(marker), direction),
            None => {
                let href = self.target(None, PageDirection::Backward);
                let default_head = format!(
                    "{}?limit={}&direction={}",
                    self.base,
                    DEFAULT_PAGE_SIZE,
                    PageDirection::Backward
                );
                if href.eq_ignore_ascii_case(&default_head) {
                    self.base.as_str().to_string()
                } else {
                    href
                }
            }
        };
        Link::new(Relation::SelfLink, href)
    }

    /// Entries newer than the page, anchored at its newest entry.
    pub fn previous(&self, newest: &EntryId) -> Link {
        Link::new(
            Relation::Previous,
            self.target(Some(newest), PageDirection::Forward),
        )
    }

    /// Entries older than the page, anchored at its oldest entry.
    pub fn next(&self, oldest: &EntryId) -> Link {
        Link::new(
            Relation::Next,
            self.target(Some(oldest), PageDirection::Backward),
        )
    }

    /// The oldest page, anchored at its newest entry.
    pub fn last(&self, anchor: &EntryId) -> Link {
        Link::new(
            Relation::Last,
            self.target(Some(anchor), PageDirection::Backward),
        )
    }

    fn target(&self, marker: Option<&EntryId>, direction: PageDirection) -> String {
        let mut href = format!("{}?limit={}", self.base, self.page_size);

        if !self.search.is_empty() {
            href.push_str("&search=");
            href.extend(form_urlencoded::byte_serialize(self.search.as_bytes()));
        }
        if let Some(marker) = marker {
            href.push_str("&marker=");
            href.extend(form_urlencoded::byte_serialize(marker.as_str().as_bytes()));
        }

        href.push_str("&direction=");
        href.push_str(direction.as_str());
        href
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedName;

    const BASE: &str = "http://localhost:8080/namespace/feed";

    fn request() -> FeedRequest {
        FeedRequest::new(
            FeedName::new("namespace/feed").unwrap(),
            FeedUri::new(BASE).unwrap(),
        )
    }

    fn id(s: &str) -> EntryId {
        EntryId::new(s).unwrap()
    }

    #[test]
    fn default_head_self_link_is_bare_base() {
        let request = request();
        let links = LinkBuilder::new(&request);
        assert_eq!(links.self_link(None).href, BASE);
        assert_eq!(links.current().href, BASE);
    }

    #[test]
    fn non_default_head_self_link_is_spelled_out() {
        let request = request().with_page_size(10).unwrap();
        let links = LinkBuilder::new(&request);
        assert_eq!(
            links.self_link(None).href,
            format!("{BASE}?limit=10&direction=backward")
        );
    }

    #[test]
    fn filtered_head_self_link_keeps_search() {
        let request = request().with_search("+cat1+cat2");
        let links = LinkBuilder::new(&request);
        assert_eq!(
            links.self_link(None).href,
            format!("{BASE}?limit=25&search=%2Bcat1%2Bcat2&direction=backward")
        );
    }

    #[test]
    fn marker_self_link_orders_parameters() {
        let request = request().with_page_size(5).unwrap().with_search("a b");
        let links = LinkBuilder::new(&request);
        let marker = id("urn:uuid:42");
        assert_eq!(
            links
                .self_link(Some((&marker, PageDirection::Forward)))
                .href,
            format!("{BASE}?limit=5&search=a+b&marker=urn%3Auuid%3A42&direction=forward")
        );
    }

    #[test]
    fn navigation_links_carry_direction() {
        let request = request();
        let links = LinkBuilder::new(&request);

        let previous = links.previous(&id("new"));
        assert_eq!(previous.rel, Relation::Previous);
        assert_eq!(
            previous.href,
            format!("{BASE}?limit=25&marker=new&direction=forward")
        );

        let next = links.next(&id("old"));
        assert_eq!(next.rel, Relation::Next);
        assert_eq!(next.href, format!("{BASE}?limit=25&marker=old&direction=backward"));

        let last = links.last(&id("tail"));
        assert_eq!(last.rel, Relation::Last);
        assert_eq!(last.href, format!("{BASE}?limit=25&marker=tail&direction=backward"));
    }

    #[test]
    fn reserved_characters_in_markers_are_encoded() {
        let request = request();
        let links = LinkBuilder::new(&request);

        let next = links.next(&id("tag:x&y+z#1"));
        assert_eq!(
            next.href,
            format!("{BASE}?limit=25&marker=tag%3Ax%26y%2Bz%231&direction=backward")
        );
    }
}
