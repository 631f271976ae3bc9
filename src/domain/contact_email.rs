use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

/// An address that passed the syntactic check. No domain or mailbox lookup
/// is ever performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if !Self::is_valid(&s) {
            return Err(format!("{s} is not a valid email address."));
        }
        Ok(Self(s))
    }

    pub fn is_valid(s: &str) -> bool {
        EMAIL_PATTERN.is_match(s)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContactEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContactEmail::parse(value)
    }
}
