//! Mock descriptors and their translation into select settings.
//!
//! A development setup that mocks backend endpoints usually already has a
//! table of request matchers and canned responses. Instead of declaring a
//! separate menu entry for every mocked user or scenario, such a descriptor
//! can be handed to the menu directly: [`entry_from_mock`] turns it into a
//! select setting whose options are the matcher cookie values and whose
//! titles come from the evaluated response labels.
//!
//! Each mock designates **exactly one** cookie in its first matcher; that
//! cookie is the setting's key, and every other matcher must carry a value
//! for the same cookie. Anything else is a declaration error and fails
//! fast, before any markup is generated.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::MenuError;
use crate::settings::types::{SelectOption, SelectSetting, Setting};

/// Request shape handed to dynamic responses.
///
/// Menu generation evaluates dynamic responses with an **empty** request;
/// the fields exist so descriptors can share response functions with a real
/// mock server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockRequest {
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

/// Cookie-based request matcher for one mocked response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MockRequestMatcher {
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

/// Literal mocked response payload.
///
/// Only `label` is read during menu generation; `status` and `body` ride
/// along for the mock server the descriptor is shared with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Function form of a mocked response.
pub type DynamicResponse = Arc<dyn Fn(&MockRequest) -> StaticResponse + Send + Sync>;

/// A mocked response: either a literal payload or a function of the request.
#[derive(Clone)]
pub enum MockResponse {
    Static(StaticResponse),
    Dynamic(DynamicResponse),
}

impl MockResponse {
    /// Literal response carrying only a label. Convenient for descriptors
    /// declared in Rust.
    pub fn with_label(label: impl Into<String>) -> Self {
        MockResponse::Static(StaticResponse {
            label: Some(label.into()),
            ..StaticResponse::default()
        })
    }

    /// Wraps a function of the request as a dynamic response.
    pub fn dynamic(f: impl Fn(&MockRequest) -> StaticResponse + Send + Sync + 'static) -> Self {
        MockResponse::Dynamic(Arc::new(f))
    }

    /// Evaluates the response: a dynamic response is invoked with an empty
    /// request, a static one is returned as-is.
    pub fn evaluate(&self) -> StaticResponse {
        match self {
            MockResponse::Static(response) => response.clone(),
            MockResponse::Dynamic(f) => f(&MockRequest::default()),
        }
    }
}

impl fmt::Debug for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockResponse::Static(response) => f.debug_tuple("Static").field(response).finish(),
            MockResponse::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<fn>").finish(),
        }
    }
}

// The JSON form of a response is always the literal payload; dynamic
// responses only exist in descriptors declared in Rust.
impl<'de> Deserialize<'de> for MockResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(MockResponse::Static(StaticResponse::deserialize(
            deserializer,
        )?))
    }
}

/// One matcher/response pair of a mock descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct MockResponseEntry {
    pub request: MockRequestMatcher,
    pub response: MockResponse,
}

impl MockResponseEntry {
    /// Entry matching `cookie = value` and answering with `response`.
    pub fn new(
        cookie: impl Into<String>,
        value: impl Into<String>,
        response: MockResponse,
    ) -> Self {
        let mut cookies = BTreeMap::new();
        cookies.insert(cookie.into(), value.into());
        Self {
            request: MockRequestMatcher { cookies },
            response,
        }
    }
}

/// Descriptor metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockMeta {
    #[serde(default)]
    pub title: Option<String>,
}

/// A mock-server descriptor the menu can generate a select setting from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockDescriptor {
    #[serde(default)]
    pub responses: Vec<MockResponseEntry>,
    /// Response served when no matcher applies; labels the `default` option.
    #[serde(default)]
    pub default_response: Option<MockResponse>,
    #[serde(default)]
    pub meta: Option<MockMeta>,
}

impl MockDescriptor {
    pub fn new(responses: Vec<MockResponseEntry>) -> Self {
        Self {
            responses,
            default_response: None,
            meta: None,
        }
    }

    pub fn default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta = Some(MockMeta {
            title: Some(title.into()),
        });
        self
    }
}

/// The single cookie a matcher designates, as a `(name, value)` pair.
fn designated_cookie(matcher: &MockRequestMatcher) -> Result<(&str, &str), MenuError> {
    let mut cookies = matcher.cookies.iter();
    let (name, value) = cookies
        .next()
        .ok_or(MenuError::AmbiguousMatcher(0))?;
    if cookies.next().is_some() {
        return Err(MenuError::AmbiguousMatcher(matcher.cookies.len()));
    }
    Ok((name, value))
}

/// Generates a select setting from a mock descriptor.
///
/// The designated cookie of the first matcher becomes the setting key, and
/// `meta.title` (or the key itself) the setting title. The option list is
/// the `default` option first, labeled from the evaluated
/// `default_response` (falling back to `"Default"`), followed by one option
/// per response: its value is the matcher's value for the designated
/// cookie, its title the evaluated response label (falling back to that
/// value).
pub fn entry_from_mock(mock: &MockDescriptor) -> Result<Setting, MenuError> {
    if mock.responses.is_empty() {
        return Err(MenuError::MockWithoutResponses);
    }

    let (key, _) = designated_cookie(&mock.responses[0].request)?;
    let title = mock
        .meta
        .as_ref()
        .and_then(|meta| meta.title.clone())
        .unwrap_or_else(|| key.to_string());

    let default_title = mock
        .default_response
        .as_ref()
        .map(MockResponse::evaluate)
        .and_then(|response| response.label)
        .unwrap_or_else(|| "Default".to_string());

    let mut options = Vec::with_capacity(mock.responses.len() + 1);
    options.push(SelectOption::new(default_title, "default"));

    for (index, entry) in mock.responses.iter().enumerate() {
        let value = entry
            .request
            .cookies
            .get(key)
            .ok_or_else(|| MenuError::MatcherMissingKey {
                key: key.to_string(),
                index,
            })?;
        let label = entry
            .response
            .evaluate()
            .label
            .unwrap_or_else(|| value.clone());
        options.push(SelectOption::new(label, value.clone()));
    }

    Ok(Setting::Select(SelectSetting::new(key, title, options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::types::OptionValue;
    use serde_json::json;

    fn premium_mock() -> MockDescriptor {
        MockDescriptor::new(vec![
            MockResponseEntry::new("mock-user", "premium", MockResponse::with_label("Premium user")),
            MockResponseEntry::new("mock-user", "basic", MockResponse::with_label("Basic user")),
        ])
        .default_response(MockResponse::with_label("Real backend"))
        .title("User")
    }

    #[test]
    fn mock_becomes_a_select_with_default_first() {
        let setting = entry_from_mock(&premium_mock()).unwrap();
        let Setting::Select(select) = setting else {
            panic!("expected a select setting");
        };

        assert_eq!(select.key, "mock-user");
        assert_eq!(select.title, "User");

        let titles: Vec<&str> = select.options.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Real backend", "Premium user", "Basic user"]);

        let values: Vec<OptionValue> = select.options.iter().map(|o| o.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                OptionValue::from("default"),
                OptionValue::from("premium"),
                OptionValue::from("basic"),
            ]
        );
    }

    #[test]
    fn missing_meta_title_falls_back_to_the_key() {
        let mock = MockDescriptor::new(vec![MockResponseEntry::new(
            "mock-user",
            "premium",
            MockResponse::with_label("Premium user"),
        )]);
        let setting = entry_from_mock(&mock).unwrap();
        assert_eq!(setting.title(), "mock-user");
    }

    #[test]
    fn missing_default_response_labels_the_default_option_default() {
        let mock = MockDescriptor::new(vec![MockResponseEntry::new(
            "mock-user",
            "premium",
            MockResponse::with_label("Premium user"),
        )]);
        let Setting::Select(select) = entry_from_mock(&mock).unwrap() else {
            panic!("expected a select setting");
        };
        assert_eq!(select.options[0].title, "Default");
    }

    #[test]
    fn unlabeled_responses_fall_back_to_the_matcher_value() {
        let mock = MockDescriptor::new(vec![MockResponseEntry::new(
            "mock-user",
            "premium",
            MockResponse::Static(StaticResponse::default()),
        )]);
        let Setting::Select(select) = entry_from_mock(&mock).unwrap() else {
            panic!("expected a select setting");
        };
        assert_eq!(select.options[1].title, "premium");
    }

    #[test]
    fn dynamic_responses_are_evaluated_with_an_empty_request() {
        let mock = MockDescriptor::new(vec![MockResponseEntry::new(
            "mock-user",
            "premium",
            MockResponse::dynamic(|request| StaticResponse {
                label: Some(format!("saw {} cookies", request.cookies.len())),
                ..StaticResponse::default()
            }),
        )]);
        let Setting::Select(select) = entry_from_mock(&mock).unwrap() else {
            panic!("expected a select setting");
        };
        assert_eq!(select.options[1].title, "saw 0 cookies");
    }

    #[test]
    fn empty_responses_fail() {
        let err = entry_from_mock(&MockDescriptor::default()).unwrap_err();
        assert!(matches!(err, MenuError::MockWithoutResponses));
    }

    #[test]
    fn a_matcher_with_two_cookies_is_ambiguous() {
        let mut cookies = BTreeMap::new();
        cookies.insert("mock-user".to_string(), "premium".to_string());
        cookies.insert("mock-plan".to_string(), "pro".to_string());
        let mock = MockDescriptor::new(vec![MockResponseEntry {
            request: MockRequestMatcher { cookies },
            response: MockResponse::with_label("Premium user"),
        }]);

        let err = entry_from_mock(&mock).unwrap_err();
        assert!(matches!(err, MenuError::AmbiguousMatcher(2)));
    }

    #[test]
    fn later_matchers_must_cover_the_designated_cookie() {
        let mock = MockDescriptor::new(vec![
            MockResponseEntry::new("mock-user", "premium", MockResponse::with_label("Premium")),
            MockResponseEntry::new("mock-plan", "pro", MockResponse::with_label("Pro plan")),
        ]);

        let err = entry_from_mock(&mock).unwrap_err();
        match err {
            MenuError::MatcherMissingKey { key, index } => {
                assert_eq!(key, "mock-user");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn descriptors_parse_from_json() {
        let mock: MockDescriptor = serde_json::from_value(json!({
            "responses": [
                {
                    "request": {"cookies": {"mock-user": "premium"}},
                    "response": {"label": "Premium user", "status": 200},
                },
            ],
            "defaultResponse": {"label": "Real backend"},
            "meta": {"title": "User"},
        }))
        .unwrap();

        let Setting::Select(select) = entry_from_mock(&mock).unwrap() else {
            panic!("expected a select setting");
        };
        assert_eq!(select.title, "User");
        assert_eq!(select.options[0].title, "Real backend");
        assert_eq!(select.options[1].title, "Premium user");
    }
}
