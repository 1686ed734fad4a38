//! Normalization of caller-supplied menu declarations.
//!
//! A menu is declared as a heterogeneous list: pre-built [`Setting`]s and
//! raw [`MockDescriptor`]s side by side, in display order. Normalization
//! turns that list into settings only, translating each descriptor through
//! [`entry_from_mock`] and keeping the declared order.

use serde_json::{Map, Value};

use crate::errors::MenuError;
use crate::settings::mock::{entry_from_mock, MockDescriptor};
use crate::settings::types::Setting;

/// One caller-supplied menu item.
#[derive(Debug, Clone)]
pub enum SettingSource {
    /// A pre-built setting, passed through untouched.
    Setting(Setting),
    /// A mock descriptor, translated into a select setting.
    Mock(MockDescriptor),
}

impl From<Setting> for SettingSource {
    fn from(setting: Setting) -> Self {
        SettingSource::Setting(setting)
    }
}

impl From<MockDescriptor> for SettingSource {
    fn from(mock: MockDescriptor) -> Self {
        SettingSource::Mock(mock)
    }
}

/// Normalizes sources into settings, preserving their order.
///
/// The first invalid mock descriptor aborts the whole list; a menu that
/// cannot be declared correctly should fail attach rather than render a
/// partial panel.
pub fn normalize(sources: Vec<SettingSource>) -> Result<Vec<Setting>, MenuError> {
    sources
        .into_iter()
        .map(|source| match source {
            SettingSource::Setting(setting) => Ok(setting),
            SettingSource::Mock(mock) => entry_from_mock(&mock),
        })
        .collect()
}

/// Parses a JSON array of settings and mock descriptors.
///
/// Items are discriminated structurally: an object is a mock descriptor iff
/// it has a `responses` or `defaultResponse` field. Setting objects without
/// a `type` field are select settings.
pub fn sources_from_json(json: &str) -> Result<Vec<SettingSource>, MenuError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| MenuError::InvalidSource(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(MenuError::InvalidSource(
            "expected a JSON array of settings".to_string(),
        ));
    };
    items.into_iter().map(source_from_value).collect()
}

/// Parses a single JSON object into a [`SettingSource`].
pub fn source_from_value(value: Value) -> Result<SettingSource, MenuError> {
    let Value::Object(mut map) = value else {
        return Err(MenuError::InvalidSource(format!(
            "expected a JSON object, got {value}"
        )));
    };

    if is_mock(&map) {
        let mock: MockDescriptor = serde_json::from_value(Value::Object(map))
            .map_err(|e| MenuError::InvalidSource(e.to_string()))?;
        return Ok(SettingSource::Mock(mock));
    }

    // Absent `type` means a select setting.
    map.entry("type")
        .or_insert_with(|| Value::String("select".to_string()));
    let setting: Setting = serde_json::from_value(Value::Object(map))
        .map_err(|e| MenuError::InvalidSource(e.to_string()))?;
    Ok(SettingSource::Setting(setting))
}

fn is_mock(map: &Map<String, Value>) -> bool {
    map.contains_key("responses") || map.contains_key("defaultResponse")
}
