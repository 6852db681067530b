//! Response contract for serving resolved assets over HTTP.
//!
//! The request loop itself belongs to the caller; this module decides the
//! status, headers and body for one resolved asset.

use std::borrow::Cow;

use crate::resolve::{Asset, Origin};

/// Payloads are immutable per fingerprint, so they may be cached for a year.
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

/// What to send back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<'a> {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Cow<'a, [u8]>,
}

impl Reply<'_> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Build the reply for `asset`, given the request's `If-None-Match` value.
///
/// - [`Origin::Found`] with a matching fingerprint → `304` with an empty body
/// - [`Origin::Missing`] → `404` with the not-found payload
/// - otherwise → `200` with the payload
pub fn reply<'a>(asset: Asset<'a>, if_none_match: Option<&str>) -> Reply<'a> {
    let mut headers = vec![("Content-Encoding", "gzip".to_string())];
    if !asset.content_type.is_empty() {
        headers.push(("Content-Type", asset.content_type.to_string()));
    }
    headers.push(("Cache-Control", CACHE_CONTROL.to_string()));
    if !asset.fingerprint.is_empty() {
        headers.push(("ETag", asset.fingerprint.to_string()));
    }

    // default-case responses always carry a full body
    if asset.origin == Origin::Found
        && let Some(header) = if_none_match
        && etag_matches(header, &asset.fingerprint)
    {
        return Reply {
            status: 304,
            headers,
            body: Cow::Borrowed(&[]),
        };
    }

    let status = match asset.origin {
        Origin::Found | Origin::Fallback => 200,
        Origin::Missing => 404,
    };
    Reply {
        status,
        headers,
        body: asset.data,
    }
}

/// Whether an `If-None-Match` header value matches `fingerprint`.
///
/// Accepts raw, quoted and weak (`W/"..."`) tags and comma-separated
/// lists. An empty fingerprint never matches.
pub fn etag_matches(header: &str, fingerprint: &str) -> bool {
    if fingerprint.is_empty() {
        return false;
    }
    header.split(',').map(str::trim).any(|tag| {
        let tag = tag.strip_prefix("W/").unwrap_or(tag);
        let tag = tag
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(tag);
        tag == fingerprint
    })
}
