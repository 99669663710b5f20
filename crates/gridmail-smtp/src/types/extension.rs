//! EHLO extension parsing.

/// SMTP extensions discovered from the EHLO response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// STARTTLS - TLS upgrade
    StartTls,
    /// AUTH - advertised mechanism names, uppercased
    Auth(Vec<String>),
    /// SIZE - maximum message size, if given
    Size(Option<u64>),
    /// 8BITMIME - 8-bit MIME transport
    EightBitMime,
    /// Unrecognized extension line
    Unknown(String),
}

impl Extension {
    /// Parses one extension line from an EHLO response.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            return Self::Unknown(line.to_string());
        };

        match keyword.to_uppercase().as_str() {
            "STARTTLS" => Self::StartTls,
            "AUTH" => Self::Auth(parts.map(str::to_uppercase).collect()),
            "SIZE" => Self::Size(parts.next().and_then(|s| s.parse().ok())),
            "8BITMIME" => Self::EightBitMime,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_starttls() {
        assert_eq!(Extension::parse("STARTTLS"), Extension::StartTls);
        assert_eq!(Extension::parse("starttls"), Extension::StartTls);
    }

    #[test]
    fn test_parse_auth_mechanisms() {
        let ext = Extension::parse("AUTH PLAIN LOGIN xoauth2");
        assert_eq!(
            ext,
            Extension::Auth(vec![
                "PLAIN".to_string(),
                "LOGIN".to_string(),
                "XOAUTH2".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(Extension::parse("SIZE 35882577"), Extension::Size(Some(35882577)));
        assert_eq!(Extension::parse("SIZE"), Extension::Size(None));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Extension::parse("PIPELINING"),
            Extension::Unknown("PIPELINING".to_string())
        );
    }
}
