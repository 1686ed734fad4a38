//! Text-field fragments.
//!
//! Text controls are not rendered inline with the rest of the panel. They
//! are stamped out of the inert `#devindex-text` template (see
//! [`TEXT_TEMPLATE`](super::assets::TEXT_TEMPLATE)) and appended into the
//! panel afterwards, which keeps the input node identity stable for hosts
//! that clone real DOM templates.

use crate::cookies::{get_cookie, CookiesHandle};
use crate::settings::TextSetting;

use super::bindings::{ControlBinding, RenderedSetting, TextBinding};
use super::generate::escape_html;

/// Instantiates the text-field template for `setting`.
///
/// The fragment mirrors the template's content with the slots filled in:
/// the span carries the title, the input is named after the setting key and
/// seeded with the persisted cookie value (empty when none is set). The
/// description paragraph is removed entirely when the setting declares
/// none.
pub fn render_text(setting: &TextSetting, cookies: &CookiesHandle) -> RenderedSetting {
    let initial_value = get_cookie(cookies, &setting.key).unwrap_or_default();

    let description = match &setting.description {
        Some(text) => format!("\n    <p>{}</p>", escape_html(text)),
        None => String::new(),
    };

    let fragment = format!(
        "<span>{title}</span>{description}\n    <br />\n    <input type=\"text\" name=\"{key}\" value=\"{value}\" />",
        title = escape_html(&setting.title),
        key = escape_html(&setting.key),
        value = escape_html(&initial_value),
    );

    RenderedSetting {
        html: String::new(),
        binding: ControlBinding::Text(TextBinding {
            key: setting.key.clone(),
            fragment,
            initial_value,
        }),
    }
}
