use serde::Deserialize;

use super::errors::ApiError;
use crate::wiki::Lang;

/// Query string of `GET /wiki`.
#[derive(Debug, Default, Deserialize)]
pub struct WikiParams {
    /// Name of the division to look up, e.g. "Guro-gu"
    pub target: Option<String>,
    /// Name of the containing region, used only to disambiguate
    pub parent: Option<String>,
    /// "en" or "ko" (default)
    pub lang: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct WikiQuery {
    pub target: String,
    pub parent: String,
    pub lang: Lang,
}

impl WikiParams {
    pub fn validate(self) -> Result<WikiQuery, ApiError> {
        let target = required(self.target, "target")?;
        let parent = required(self.parent, "parent")?;
        let lang = match self.lang.as_deref().map(str::trim) {
            None | Some("") => Lang::default(),
            Some(token) => token
                .parse::<Lang>()
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        };
        Ok(WikiQuery {
            target,
            parent,
            lang,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest(format!("{name} must not be empty")))
}
