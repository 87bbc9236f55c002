use std::fmt;
use std::str::FromStr;

/// Wikipedia language edition a query is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    En,
    #[default]
    Ko,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language '{0}': expected \"en\" or \"ko\"")]
pub struct UnknownLang(String);

// Excerpt words that mark a search hit as a place rather than a namesake.
const EN_KEYWORDS: &[&str] = &[
    "county", "city", "cities", "state", "country", "district", "village", "town", "province",
];
const KO_KEYWORDS: &[&str] = &["시", "도", "군", "구", "면", "읍", "동", "리"];

// Lead-section phrases of disambiguation pages.
const EN_LISTING_HINTS: &[&str] = &["several", "may refer to", "other uses"];
const KO_LISTING_HINTS: &[&str] = &["다른 뜻", "동음이의", "다른 지역"];

impl Lang {
    pub fn base_url(self) -> &'static str {
        match self {
            Lang::En => "https://en.wikipedia.org",
            Lang::Ko => "https://ko.wikipedia.org",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Lang::En => EN_KEYWORDS,
            Lang::Ko => KO_KEYWORDS,
        }
    }

    pub fn listing_hints(self) -> &'static [&'static str] {
        match self {
            Lang::En => EN_LISTING_HINTS,
            Lang::Ko => KO_LISTING_HINTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ko => "ko",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = UnknownLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ko" => Ok(Lang::Ko),
            _ => Err(UnknownLang(s.to_string())),
        }
    }
}
