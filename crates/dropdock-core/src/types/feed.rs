use serde::{Deserialize, Serialize};

/// Single entry of the Spamhaus ASN-DROP feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEntry {
    /// Autonomous system number
    #[serde(default)]
    pub asn: Option<u64>,

    /// Regional internet registry
    #[serde(default)]
    pub rir: Option<String>,

    /// Domain associated with the listing
    pub domain: String,

    /// Two-letter country code
    #[serde(default, rename = "cc")]
    pub country_code: Option<String>,

    /// Name of the autonomous system
    #[serde(default, rename = "asname")]
    pub as_name: Option<String>,
}

impl DropEntry {
    /// Create an entry carrying only a domain
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            asn: None,
            rir: None,
            domain: domain.into(),
            country_code: None,
            as_name: None,
        }
    }

    /// Returns true if the domain ends in an alphabetic TLD and may be synced
    #[must_use]
    pub fn is_valid_domain(&self) -> bool {
        is_valid_domain(&self.domain)
    }

    /// Pi-hole regex matching the domain and all of its subdomains
    #[must_use]
    pub fn block_pattern(&self) -> String {
        block_pattern(&self.domain)
    }
}

/// Check a hostname against `([A-Za-z0-9-]+\.)+[A-Za-z]{2,}`.
///
/// At least two labels are required; the last one must be alphabetic and
/// at least two characters long.
#[must_use]
pub fn is_valid_domain(domain: &str) -> bool {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
        && labels.split('.').all(|label| {
            !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// Convert a domain to the regex Pi-hole stores for it.
///
/// Example: `"ncryptd.net"` -> `"(\.|^)ncryptd\.net$"`
#[must_use]
pub fn block_pattern(domain: &str) -> String {
    format!(r"(\.|^){}$", domain.replace('.', r"\."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        for domain in [
            "ncryptd.net",
            "a.regular.domain.cn",
            "xn--80ak6aa92e.com",
            "my-host.example.org",
            "1.2.3.example.com",
            "UPPER.CASE.NET",
        ] {
            assert!(is_valid_domain(domain), "{domain} should be valid");
        }
    }

    #[test]
    fn test_invalid_domains() {
        for domain in [
            "",
            "localhost",
            "1.2.3",
            "1.2.3.4",
            "example.c",
            "example.c0m",
            ".example.com",
            "example..com",
            "example.com.",
            "exa_mple.com",
            "exa mple.com",
            "bücher.de",
        ] {
            assert!(!is_valid_domain(domain), "{domain:?} should be invalid");
        }
    }

    #[test]
    fn test_hyphen_only_labels_accepted() {
        assert!(is_valid_domain("-.com"));
        assert!(is_valid_domain("a.--.net"));
        assert!(!is_valid_domain("a.-"));
    }

    #[test]
    fn test_block_pattern() {
        assert_eq!(block_pattern("ncryptd.net"), r"(\.|^)ncryptd\.net$");
        assert_eq!(
            block_pattern("a.regular.domain.cn"),
            r"(\.|^)a\.regular\.domain\.cn$"
        );
    }

    #[test]
    fn test_entry_deserialization() {
        let json = r#"{"asn":6939,"rir":"arin","domain":"he.net","cc":"US","asname":"HURRICANE"}"#;
        let entry: DropEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.asn, Some(6939));
        assert_eq!(entry.rir.as_deref(), Some("arin"));
        assert_eq!(entry.country_code.as_deref(), Some("US"));
        assert_eq!(entry.as_name.as_deref(), Some("HURRICANE"));
        assert!(entry.is_valid_domain());
        assert_eq!(entry.block_pattern(), r"(\.|^)he\.net$");
    }

    #[test]
    fn test_entry_requires_domain() {
        let json = r#"{"asn":6939,"rir":"arin"}"#;
        assert!(serde_json::from_str::<DropEntry>(json).is_err());
    }
}
