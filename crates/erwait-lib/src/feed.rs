//! RSS feed document built from wait-time records.
//!
//! The document shape is fixed: an `rss` root carrying the version, namespace
//! and robots attributes, one `channel` with a static title and description,
//! and one `item` per record in input order.
//!
//! ```text
//! <rss version="2.0" xmlns:atom="http://www.w3.org/1999/xhtml" name="robots" content="noindex">
//!   <channel>
//!     <title>ER Wait Time</title>
//!     <description>RSS feed for ER wait time</description>
//!     <item>
//!       <title>Hospital Code ABC123</title>
//!       <description>3 Minutes</description>
//!       <time>3</time>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::WaitTimeRecord;

/// Declaration prepended to every rendered feed.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub const RSS_VERSION: &str = "2.0";
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub const ROBOTS_NAME: &str = "robots";
pub const ROBOTS_CONTENT: &str = "noindex";
pub const FEED_TITLE: &str = "ER Wait Time";
pub const FEED_DESCRIPTION: &str = "RSS feed for ER wait time";

/// Root `rss` element. Attribute fields must precede child elements for the
/// XML serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "rss")]
pub struct FeedDocument {
    #[serde(rename = "@version")]
    pub version: String,

    #[serde(rename = "@xmlns:atom")]
    pub atom_namespace: String,

    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@content")]
    pub content: String,

    pub channel: Channel,
}

/// The single `channel` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub title: String,
    pub description: String,

    #[serde(rename = "item")]
    pub items: Vec<FeedItem>,
}

/// One `item` per wait-time record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    /// `Hospital Code <facility code>`.
    pub title: String,
    /// `<minutes> Minutes`.
    pub description: String,
    /// Raw minute count.
    pub time: u64,
}

impl From<&WaitTimeRecord> for FeedItem {
    fn from(record: &WaitTimeRecord) -> Self {
        let minutes = record.minutes();
        Self {
            title: format!("Hospital Code {}", record.facility_code),
            description: format!("{} Minutes", minutes),
            time: minutes,
        }
    }
}

/// Build the feed for `records`. Items are independent of one another and
/// are collected in input order.
pub fn build_feed(records: &[WaitTimeRecord]) -> FeedDocument {
    FeedDocument {
        version: RSS_VERSION.to_string(),
        atom_namespace: ATOM_NAMESPACE.to_string(),
        name: ROBOTS_NAME.to_string(),
        content: ROBOTS_CONTENT.to_string(),
        channel: Channel {
            title: FEED_TITLE.to_string(),
            description: FEED_DESCRIPTION.to_string(),
            items: records.iter().map(FeedItem::from).collect(),
        },
    }
}

impl FeedDocument {
    pub fn item_count(&self) -> usize {
        self.channel.items.len()
    }

    /// Render the document as XML text prefixed with [`XML_DECLARATION`].
    pub fn to_xml(&self) -> Result<String> {
        let body = quick_xml::se::to_string(self).map_err(|e| Error::FeedSerialize {
            message: e.to_string(),
        })?;

        let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len());
        xml.push_str(XML_DECLARATION);
        xml.push_str(&body);
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_fields_follow_the_record() {
        let item = FeedItem::from(&WaitTimeRecord::new("ABC123", 185));
        assert_eq!(item.title, "Hospital Code ABC123");
        assert_eq!(item.description, "3 Minutes");
        assert_eq!(item.time, 3);
    }

    #[test]
    fn zero_seconds_is_zero_minutes() {
        let item = FeedItem::from(&WaitTimeRecord::new("Z", 0));
        assert_eq!(item.description, "0 Minutes");
        assert_eq!(item.time, 0);
    }

    #[test]
    fn channel_metadata_is_static() {
        let feed = build_feed(&[]);
        assert_eq!(feed.version, "2.0");
        assert_eq!(feed.atom_namespace, ATOM_NAMESPACE);
        assert_eq!(feed.channel.title, "ER Wait Time");
        assert_eq!(feed.channel.description, "RSS feed for ER wait time");
        assert_eq!(feed.item_count(), 0);
    }

    #[test]
    fn xml_starts_with_declaration_and_root_attributes() {
        let xml = build_feed(&[]).to_xml().expect("renders");
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"version="2.0""#));
        assert!(xml.contains(r#"xmlns:atom="http://www.w3.org/1999/xhtml""#));
        assert!(xml.contains(r#"name="robots""#));
        assert!(xml.contains(r#"content="noindex""#));
    }

    #[test]
    fn facility_codes_are_escaped() {
        let xml = build_feed(&[WaitTimeRecord::new("A<&B", 60)])
            .to_xml()
            .expect("renders");
        assert!(xml.contains("<title>Hospital Code A&lt;&amp;B</title>"));
    }
}
