//! ER wait-time library entry points.
//!
//! This crate validates the upstream wait-time payload, turns it into an RSS
//! feed document, renders that document as XML and talks to the upstream
//! wait-time API. Higher-level consumers (HTTP service, Lambda) should only
//! depend on the functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod feed;
pub mod record;
pub mod upstream;

pub use config::UpstreamConfig;
pub use error::{Error, Result};
pub use feed::{build_feed, Channel, FeedDocument, FeedItem, XML_DECLARATION};
pub use record::{parse_records, WaitTimeRecord};
pub use upstream::{UpstreamClient, WaitTimeSource};
