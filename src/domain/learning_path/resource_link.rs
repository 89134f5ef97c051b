//! ResourceLink entity - a titled URL attached to a learning path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PathId, ResourceLinkId, ValidationError};

/// Maximum length for a link title.
pub const MAX_LINK_TITLE_LENGTH: usize = 200;

/// Maximum length for a link URL.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reference material for a path. Carries no completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    id: ResourceLinkId,
    path_id: PathId,
    title: String,
    url: String,
}

impl ResourceLink {
    /// Creates a new link under the given path.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or url is blank
    /// - `TooLong` if either exceeds its bound
    /// - `InvalidFormat` if the url is not http(s)
    pub fn new(
        path_id: PathId,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = validate_text("title", title.into(), MAX_LINK_TITLE_LENGTH)?;
        let url = validate_url(url.into())?;
        Ok(Self {
            id: ResourceLinkId::new(),
            path_id,
            title,
            url,
        })
    }

    /// Reconstitute a link from persistence (no validation).
    pub fn reconstitute(id: ResourceLinkId, path_id: PathId, title: String, url: String) -> Self {
        Self {
            id,
            path_id,
            title,
            url,
        }
    }

    pub fn id(&self) -> &ResourceLinkId {
        &self.id
    }

    pub fn path_id(&self) -> &PathId {
        &self.path_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether this link is owned by the given path.
    pub fn belongs_to(&self, path_id: &PathId) -> bool {
        &self.path_id == path_id
    }
}

fn validate_text(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(trimmed.to_string())
}

fn validate_url(url: String) -> Result<String, ValidationError> {
    let url = validate_text("url", url, MAX_URL_LENGTH)?;
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !url.contains(char::is_whitespace) => Ok(url),
        _ => Err(ValidationError::invalid_format(
            "url",
            "must be an absolute http or https URL",
        )),
    }
}
