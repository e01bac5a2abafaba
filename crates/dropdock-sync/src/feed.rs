//! Spamhaus ASN-DROP feed retrieval.
//!
//! The feed is newline-delimited JSON. Every line but the last is an entry;
//! the last line carries feed metadata and is discarded.

use dropdock_core::{DropEntry, DropdockError, Result};
use reqwest::Client as HttpClient;
use tracing::{debug, info};

/// Published location of the ASN-DROP feed
pub const DEFAULT_FEED_URL: &str = "https://www.spamhaus.org/drop/asndrop.json";

/// Fetches and decodes the DROP feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: HttpClient,
    url: String,
}

impl FeedClient {
    /// Create a client for the given feed URL.
    ///
    /// Unlike the Pi-hole client, certificates are verified.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(format!("dropdock/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DropdockError::Fetch(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// The feed URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and decode the feed
    pub async fn fetch(&self) -> Result<Vec<DropEntry>> {
        debug!(url = %self.url, "Fetching DROP feed");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DropdockError::Fetch(format!("{}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DropdockError::Fetch(format!(
                "{} returned {status}",
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DropdockError::Fetch(format!("{}: {e}", self.url)))?;

        let entries = parse_feed(&body)?;
        info!(count = entries.len(), "Pulled entries from Spamhaus DROP");
        Ok(entries)
    }
}

/// Decode feed text, dropping the trailing metadata line and blank lines
pub fn parse_feed(text: &str) -> Result<Vec<DropEntry>> {
    let lines: Vec<&str> = text.lines().collect();
    let Some((_metadata, entries)) = lines.split_last() else {
        return Ok(Vec::new());
    };

    entries
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                DropdockError::Fetch(format!("malformed feed line {}: {e}", index + 1))
            })
        })
        .collect()
}

/// Keep only entries whose domain can be synced
pub fn filter_valid(entries: Vec<DropEntry>) -> Vec<DropEntry> {
    let total = entries.len();
    let valid: Vec<DropEntry> = entries
        .into_iter()
        .filter(DropEntry::is_valid_domain)
        .collect();
    info!(total, valid = valid.len(), "Filtered to valid domains");
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = concat!(
        r#"{"asn":6939,"rir":"arin","domain":"he.net","cc":"US","asname":"HURRICANE"}"#,
        "\n",
        r#"{"asn":64496,"rir":"ripencc","domain":"ncryptd.net","cc":"NL","asname":"NCRYPTD"}"#,
        "\n",
        "\n",
        r#"{"asn":64497,"rir":"apnic","domain":"localhost"}"#,
        "\n",
        r#"{"type":"metadata","timestamp":1717000000,"size":3,"records":3,"copyright":"(c) 2024 The Spamhaus Project SLU"}"#,
        "\n",
    );

    #[test]
    fn test_parse_drops_metadata_and_blank_lines() {
        let entries = parse_feed(FEED).unwrap();
        let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["he.net", "ncryptd.net", "localhost"]);
        assert_eq!(entries[1].country_code.as_deref(), Some("NL"));
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let text = "{\"domain\":\"a.example.com\"}\n{\"type\":\"metadata\"}";
        let entries = parse_feed(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].domain, "a.example.com");
    }

    #[test]
    fn test_parse_empty_feed() {
        assert!(parse_feed("").unwrap().is_empty());
        assert!(parse_feed("{\"type\":\"metadata\"}\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_line() {
        let text = "{\"domain\":\"a.example.com\"}\n{\"asn\":1}\n{\"type\":\"metadata\"}\n";
        let err = parse_feed(text).unwrap_err();
        match err {
            DropdockError::Fetch(message) => assert!(message.contains("line 2")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_valid() {
        let entries = parse_feed(FEED).unwrap();
        let valid = filter_valid(entries);
        let domains: Vec<&str> = valid.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["he.net", "ncryptd.net"]);
    }
}
