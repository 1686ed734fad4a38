//! Core setting types.
//!
//! A menu is declared as a list of settings. Every setting is one of three
//! shapes: a [`SelectSetting`] (dropdown persisted as a cookie), a
//! [`LinksSetting`] (shortcut list), or a [`TextSetting`] (free-text input
//! persisted as a cookie). The serialized form is a JSON object tagged with
//! `"type"`; declarations written in Rust use the constructors below.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value a select option stores when chosen.
///
/// Plain strings travel through the cookie untouched. Structured values are
/// kept as JSON and take the canonical pretty-printed form when persisted,
/// so a page reading them back gets a stable, diffable payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Structured(Value),
}

impl OptionValue {
    /// The string form persisted for this value: plain text verbatim,
    /// structured values as canonical pretty-printed JSON (2-space indent).
    pub fn to_state_string(&self) -> String {
        match self {
            OptionValue::Text(text) => text.clone(),
            OptionValue::Structured(value) => {
                serde_json::to_string_pretty(value).expect("JSON value serialization cannot fail")
            }
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Structured(value)
    }
}

/// One choice in a select control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub title: String,
    pub value: OptionValue,
}

impl SelectOption {
    pub fn new(title: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// One entry in a links list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkOption {
    pub title: String,
    pub href: String,
}

impl LinkOption {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

fn default_reload() -> bool {
    true
}

/// Dropdown setting persisted under its `key` cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSetting {
    /// Cookie name the chosen value is persisted under. Doubles as the
    /// control's DOM id and name.
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reload the page after a change is persisted (default: true).
    #[serde(default = "default_reload")]
    pub reload_on_change: bool,
    /// Identifier of a registered callback to invoke after a change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_on_change: Option<String>,
    /// Mirror the chosen value into session storage. Option values are
    /// base64-wrapped in the markup when this is on.
    #[serde(default)]
    pub session_storage: bool,
    pub options: Vec<SelectOption>,
}

impl SelectSetting {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: None,
            reload_on_change: true,
            exec_on_change: None,
            session_storage: false,
            options,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn reload_on_change(mut self, on: bool) -> Self {
        self.reload_on_change = on;
        self
    }

    pub fn exec_on_change(mut self, callback: impl Into<String>) -> Self {
        self.exec_on_change = Some(callback.into());
        self
    }

    pub fn session_storage(mut self, on: bool) -> Self {
        self.session_storage = on;
        self
    }
}

/// Static list of shortcut links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksSetting {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<LinkOption>,
}

impl LinksSetting {
    pub fn new(title: impl Into<String>, options: Vec<LinkOption>) -> Self {
        Self {
            title: title.into(),
            description: None,
            options,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Free-text input persisted under its `key` cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSetting {
    /// Cookie name the entered text is persisted under.
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Part of the declared shape but unused by rendering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<LinkOption>,
}

impl TextSetting {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: None,
            options: Vec::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// A fully-typed menu setting.
///
/// The JSON form is tagged: `{"type": "select", ...}`, `{"type": "links",
/// ...}` or `{"type": "text", ...}`. Objects without a `type` field are
/// treated as selects at the parsing boundary, see
/// [`sources_from_json`](crate::settings::sources_from_json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Setting {
    Select(SelectSetting),
    Links(LinksSetting),
    Text(TextSetting),
}

impl Setting {
    /// The cookie key this setting persists under, when it has one. Links
    /// settings persist nothing.
    pub fn key(&self) -> Option<&str> {
        match self {
            Setting::Select(s) => Some(&s.key),
            Setting::Text(s) => Some(&s.key),
            Setting::Links(_) => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Setting::Select(s) => &s.title,
            Setting::Links(s) => &s.title,
            Setting::Text(s) => &s.title,
        }
    }
}

impl From<SelectSetting> for Setting {
    fn from(setting: SelectSetting) -> Self {
        Setting::Select(setting)
    }
}

impl From<LinksSetting> for Setting {
    fn from(setting: LinksSetting) -> Self {
        Setting::Links(setting)
    }
}

impl From<TextSetting> for Setting {
    fn from(setting: TextSetting) -> Self {
        Setting::Text(setting)
    }
}
