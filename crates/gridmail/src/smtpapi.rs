//! The X-SMTPAPI header block.
//!
//! SendGrid's SMTP API accepts per-message instructions as a JSON document in
//! the `X-SMTPAPI` header: recipient expansion, substitutions, sections,
//! categories, unique arguments, and app filter settings.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The X-SMTPAPI instruction block.
///
/// An empty block serializes to nothing; the header is only attached when
/// the block carries data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SmtpApi {
    /// Recipient expansion list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    to: Vec<String>,

    /// Substitution tags, one value list per tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    sub: BTreeMap<String, Vec<String>>,

    /// Named sections referenced from substitution values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    section: BTreeMap<String, String>,

    /// Message categories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    category: Vec<String>,

    /// Unique arguments echoed back in event notifications.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    unique_args: BTreeMap<String, String>,

    /// App filter settings, keyed by filter name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    filters: BTreeMap<String, FilterSettings>,
}

/// Settings for one app filter.
#[derive(Debug, Clone, Default, Serialize)]
struct FilterSettings {
    settings: BTreeMap<String, Value>,
}

impl SmtpApi {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expansion recipient.
    #[must_use]
    pub fn add_to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Adds a substitution value for a tag.
    #[must_use]
    pub fn add_substitution(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.sub.entry(tag.into()).or_default().push(value.into());
        self
    }

    /// Sets a named section.
    #[must_use]
    pub fn set_section(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.section.insert(name.into(), value.into());
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn add_category(mut self, category: impl Into<String>) -> Self {
        self.category.push(category.into());
        self
    }

    /// Sets a unique argument.
    #[must_use]
    pub fn set_unique_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.unique_args.insert(key.into(), value.into());
        self
    }

    /// Sets one setting of an app filter.
    #[must_use]
    pub fn set_filter_setting(
        mut self,
        filter: impl Into<String>,
        setting: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.filters
            .entry(filter.into())
            .or_default()
            .settings
            .insert(setting.into(), value.into());
        self
    }

    /// Returns true if the block carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
            && self.sub.is_empty()
            && self.section.is_empty()
            && self.category.is_empty()
            && self.unique_args.is_empty()
            && self.filters.is_empty()
    }

    /// Serializes the block to its JSON header value.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
