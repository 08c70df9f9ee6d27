use std::fmt;

/// Environment names checked in order; the first non-empty value wins.
const ENV_KEYS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// The upstream API key. `Debug` redacts the value so it cannot reach logs
/// or error payloads through formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    pub fn from_env() -> Option<Self> {
        ENV_KEYS
            .iter()
            .find_map(|key| std::env::var(key).ok().and_then(Self::new))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(ApiCredential::new("").is_none());
        assert!(ApiCredential::new("   ").is_none());
        assert_eq!(
            ApiCredential::new("  key-123 ").unwrap().expose(),
            "key-123"
        );
    }

    #[test]
    fn debug_never_prints_the_value() {
        let credential = ApiCredential::new("super-secret").unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
