use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country of origin, normalized once when the catalog is ingested.
///
/// The backend has used both two-letter codes (`BD`, `IN`) and full country
/// names; both spellings collapse to the same variant here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Origin {
    Bangladesh,
    India,
    Other(String),
}

/// What the lookup tells the user about a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Originates from the flagged country.
    Flagged,
    /// Locally sourced alternative.
    Alternative,
    Unknown,
}

impl Origin {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "bd" | "bgd" | "bangladesh" => Origin::Bangladesh,
            "in" | "ind" | "india" => Origin::India,
            _ => Origin::Other(trimmed.to_string()),
        }
    }

    /// Canonical two-letter code; unknown origins keep their original text.
    pub fn code(&self) -> &str {
        match self {
            Origin::Bangladesh => "BD",
            Origin::India => "IN",
            Origin::Other(s) => s.as_str(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Origin::Bangladesh => "Bangladesh",
            Origin::India => "India",
            Origin::Other(s) if s.is_empty() => "Unknown",
            Origin::Other(s) => s.as_str(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            Origin::India => Verdict::Flagged,
            Origin::Bangladesh => Verdict::Alternative,
            Origin::Other(_) => Verdict::Unknown,
        }
    }
}

impl From<String> for Origin {
    fn from(s: String) -> Self {
        Origin::parse(&s)
    }
}

impl From<Origin> for String {
    fn from(o: Origin) -> Self {
        o.code().to_string()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Verdict {
    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Flagged => "✘",
            Verdict::Alternative => "✔",
            Verdict::Unknown => "?",
        }
    }
}

/// Origin filter used by the product table (`all`, `BD`, `IN`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OriginFilter {
    #[default]
    All,
    Only(Origin),
}

impl OriginFilter {
    pub fn matches(&self, origin: &Origin) -> bool {
        match self {
            OriginFilter::All => true,
            OriginFilter::Only(o) => o == origin,
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            OriginFilter::All => "all",
            OriginFilter::Only(o) => o.code(),
        }
    }
}

impl FromStr for OriginFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("all") {
            Ok(OriginFilter::All)
        } else {
            Ok(OriginFilter::Only(Origin::parse(t)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_vocabulary() {
        assert_eq!(Origin::parse("BD"), Origin::Bangladesh);
        assert_eq!(Origin::parse("bangladesh"), Origin::Bangladesh);
        assert_eq!(Origin::parse(" India "), Origin::India);
        assert_eq!(Origin::parse("in"), Origin::India);
        assert_eq!(Origin::parse("NP"), Origin::Other("NP".into()));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Origin::India).unwrap();
        assert_eq!(json, "\"IN\"");
        let back: Origin = serde_json::from_str("\"Bangladesh\"").unwrap();
        assert_eq!(back, Origin::Bangladesh);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(Origin::India.verdict(), Verdict::Flagged);
        assert_eq!(Origin::Bangladesh.verdict(), Verdict::Alternative);
        assert_eq!(Origin::Other(String::new()).verdict(), Verdict::Unknown);
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<OriginFilter>().unwrap(), OriginFilter::All);
        assert_eq!("".parse::<OriginFilter>().unwrap(), OriginFilter::All);
        let f: OriginFilter = "IN".parse().unwrap();
        assert!(f.matches(&Origin::India));
        assert!(!f.matches(&Origin::Bangladesh));
        assert_eq!(f.as_param(), "IN");
    }
}
