//! Markup generation for settings.
//!
//! Rendering is pure string assembly against the jar's current state; no
//! document is consulted. Everything dynamic a control needs later travels
//! in the returned [`RenderedSetting`] binding.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::cookies::{get_cookie, CookiesHandle};
use crate::settings::{LinksSetting, OptionValue, SelectSetting, Setting};

use super::bindings::{
    ControlBinding, LinkBinding, RenderedSetting, SelectBinding, SelectOptionBinding, ROUTE_MARKER,
};
use super::text_field;

/// Renders one setting into panel markup plus its control binding.
///
/// The jar is consulted for initial control values, so the generated panel
/// reflects choices persisted on previous page loads.
pub fn render(setting: &Setting, cookies: &CookiesHandle) -> RenderedSetting {
    match setting {
        Setting::Select(select) => render_select(select, cookies),
        Setting::Links(links) => render_links(links),
        Setting::Text(text) => text_field::render_text(text, cookies),
    }
}

fn render_select(setting: &SelectSetting, cookies: &CookiesHandle) -> RenderedSetting {
    let key = escape_html(&setting.key);
    let exec = match &setting.exec_on_change {
        Some(callback) => format!(" data-exec-on-change=\"{}\"", escape_html(callback)),
        None => String::new(),
    };

    let mut html = format!(
        "<label for=\"{key}\" class=\"label\">{title}</label>{description}\
         <select id=\"{key}\" data-sessionStorage=\"{session}\" data-reload=\"{reload}\"{exec} name=\"{key}\" tabindex=\"-1\">",
        title = escape_html(&setting.title),
        description = description_markup(setting.description.as_deref()),
        session = setting.session_storage,
        reload = setting.reload_on_change,
    );

    let mut options = Vec::with_capacity(setting.options.len());
    for option in &setting.options {
        let encoded = encode_option_value(&option.value, setting.session_storage);
        html.push_str(&format!(
            "<option value=\"{value}\">{title}</option>",
            value = escape_html(&encoded),
            title = escape_html(&option.title),
        ));
        options.push(SelectOptionBinding {
            title: option.title.clone(),
            value: encoded,
        });
    }
    html.push_str("</select>");

    // An empty persisted value counts as unset, it only ever appears after
    // a session-storage clear.
    let initial_value = get_cookie(cookies, &setting.key)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "default".to_string());

    RenderedSetting {
        html,
        binding: ControlBinding::Select(SelectBinding {
            key: setting.key.clone(),
            session_storage: setting.session_storage,
            reload_on_change: setting.reload_on_change,
            exec_on_change: setting.exec_on_change.clone(),
            options,
            initial_value,
        }),
    }
}

fn render_links(setting: &LinksSetting) -> RenderedSetting {
    let mut html = format!(
        "{title} {description}<ul>",
        title = escape_html(&setting.title),
        description = description_markup(setting.description.as_deref()),
    );

    let mut links = Vec::with_capacity(setting.options.len());
    for option in &setting.options {
        html.push_str(&format!(
            "<li><a href=\"{href}\">{title}</a></li>",
            href = escape_html(&option.href),
            title = escape_html(&option.title),
        ));
        links.push(LinkBinding {
            title: option.title.clone(),
            href: option.href.clone(),
            intercept: option.href.starts_with(ROUTE_MARKER),
        });
    }
    html.push_str("</ul>");

    RenderedSetting {
        html,
        binding: ControlBinding::Links(links),
    }
}

/// Encodes one option's stored value for the markup `value` attribute.
///
/// Plain-mode values pass through untouched. In session-storage mode the
/// state string is base64-wrapped so arbitrary payloads survive the cookie
/// round trip.
fn encode_option_value(value: &OptionValue, session_storage: bool) -> String {
    let state = value.to_state_string();
    if session_storage {
        BASE64.encode(state)
    } else {
        state
    }
}

fn description_markup(description: Option<&str>) -> String {
    match description {
        Some(text) => format!("<p>{}</p>", escape_html(text)),
        None => String::new(),
    }
}

pub(super) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{set_cookie, InMemoryPageCookies};
    use crate::settings::{LinkOption, SelectOption};
    use serde_json::json;

    fn jar() -> CookiesHandle {
        InMemoryPageCookies::new().into_handle()
    }

    fn user_select() -> SelectSetting {
        SelectSetting::new(
            "mock-user",
            "User",
            vec![
                SelectOption::new("Default", "default"),
                SelectOption::new("Premium user", "premium"),
            ],
        )
    }

    #[test]
    fn select_markup_carries_the_wiring_attributes() {
        let rendered = render(&Setting::from(user_select()), &jar());

        assert!(rendered.html.contains("<label for=\"mock-user\" class=\"label\">User</label>"));
        assert!(rendered.html.contains("<select id=\"mock-user\""));
        assert!(rendered.html.contains("data-sessionStorage=\"false\""));
        assert!(rendered.html.contains("data-reload=\"true\""));
        assert!(rendered.html.contains("name=\"mock-user\""));
        assert!(rendered.html.contains("tabindex=\"-1\""));
        assert!(rendered.html.contains("<option value=\"premium\">Premium user</option>"));
        assert!(!rendered.html.contains("data-exec-on-change"));
    }

    #[test]
    fn exec_on_change_is_rendered_when_declared() {
        let setting = user_select().exec_on_change("refreshUser");
        let rendered = render(&Setting::from(setting), &jar());
        assert!(rendered.html.contains(" data-exec-on-change=\"refreshUser\""));
    }

    #[test]
    fn titles_and_descriptions_are_escaped() {
        let setting = user_select().description("choose <b>wisely</b> & carefully");
        let rendered = render(&Setting::from(setting), &jar());
        assert!(rendered
            .html
            .contains("<p>choose &lt;b&gt;wisely&lt;/b&gt; &amp; carefully</p>"));
    }

    #[test]
    fn session_storage_mode_base64_wraps_pretty_json() {
        let setting = SelectSetting::new(
            "mock-user",
            "User",
            vec![SelectOption::new("Fancy", json!({"x": 1}))],
        )
        .session_storage(true);

        let rendered = render(&Setting::from(setting), &jar());
        let ControlBinding::Select(binding) = rendered.binding else {
            panic!("expected a select binding");
        };

        let encoded = &binding.options[0].value;
        let decoded = BASE64.decode(encoded.as_bytes()).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "{\n  \"x\": 1\n}");
        assert!(rendered.html.contains(&format!("value=\"{encoded}\"")));
    }

    #[test]
    fn plain_mode_values_pass_through_verbatim() {
        let rendered = render(&Setting::from(user_select()), &jar());
        let ControlBinding::Select(binding) = rendered.binding else {
            panic!("expected a select binding");
        };
        assert_eq!(binding.options[1].value, "premium");
    }

    #[test]
    fn initial_value_comes_from_the_cookie() {
        let cookies = jar();
        set_cookie(&cookies, "mock-user", "premium", 30);

        let rendered = render(&Setting::from(user_select()), &cookies);
        let ControlBinding::Select(binding) = rendered.binding else {
            panic!("expected a select binding");
        };
        assert_eq!(binding.initial_value, "premium");
    }

    #[test]
    fn initial_value_defaults_when_no_cookie_is_set() {
        let rendered = render(&Setting::from(user_select()), &jar());
        let ControlBinding::Select(binding) = rendered.binding else {
            panic!("expected a select binding");
        };
        assert_eq!(binding.initial_value, "default");
    }

    #[test]
    fn empty_cookie_values_read_as_default() {
        let cookies = jar();
        set_cookie(&cookies, "mock-user", "", 30);

        let rendered = render(&Setting::from(user_select()), &cookies);
        let ControlBinding::Select(binding) = rendered.binding else {
            panic!("expected a select binding");
        };
        assert_eq!(binding.initial_value, "default");
    }

    #[test]
    fn route_links_are_marked_for_interception() {
        let setting = LinksSetting::new(
            "Shortcuts",
            vec![
                LinkOption::new("Review", "/#/review/8"),
                LinkOption::new("Docs", "https://example.com/docs"),
            ],
        );

        let rendered = render(&Setting::from(setting), &jar());
        assert!(rendered.html.contains("<li><a href=\"/#/review/8\">Review</a></li>"));

        let ControlBinding::Links(links) = rendered.binding else {
            panic!("expected a links binding");
        };
        assert!(links[0].intercept);
        assert!(!links[1].intercept);
    }
}
