//! Static markup assets: the injected stylesheet, the text-field template,
//! and the panel scaffold everything else is placed into.

use super::generate::escape_html;

/// Stylesheet injected into the host page's `<head>`.
///
/// Everything is scoped under `.secret-menu` so the overlay does not leak
/// styles into the page under development. The panel is closed by default;
/// the `open` class on the root element shows it.
pub const STYLESHEET: &str = "\
.secret-menu{position:fixed;top:0;right:0;z-index:9999;font-family:sans-serif;font-size:14px;color:#222}\
.secret-menu .toggle{position:absolute;top:8px;right:8px;width:32px;height:32px;padding:4px;border:0;background:transparent;cursor:pointer}\
.secret-menu .toggle span{display:block;height:3px;background:#444;margin:4px 2px;border-radius:2px}\
.secret-menu .sr-only{position:absolute;width:1px;height:1px;padding:0;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;border:0}\
.secret-menu .menu{display:none;margin-top:48px;background:#fff;border:1px solid #ccc;box-shadow:0 2px 8px rgba(0,0,0,.2);padding:12px 16px;min-width:220px;max-height:80vh;overflow-y:auto}\
.secret-menu.open .menu{display:block}\
.secret-menu .label{display:block;font-weight:600;margin-top:10px}\
.secret-menu select,.secret-menu input{width:100%;margin:4px 0 8px;box-sizing:border-box}\
.secret-menu p{margin:2px 0 6px;color:#666}\
.secret-menu ul{list-style:none;margin:4px 0;padding:0}";

/// Inert template for text-field fragments, injected into the body once.
///
/// Hosts that clone real DOM nodes instantiate text controls from this
/// element; the fragments produced by the generator mirror its content.
pub const TEXT_TEMPLATE: &str = "\
<template id=\"devindex-text\">
    <span></span>
    <p></p>
    <br />
    <input type=\"text\" />
</template>";

/// Wraps the stylesheet for head injection.
pub fn style_markup() -> String {
    format!("<style>{STYLESHEET}</style>")
}

/// Wraps the rendered settings in the overlay scaffold: the root container,
/// the hamburger toggle with its screen-reader caption, and the collapsible
/// menu body.
///
/// The toggle's inline handler names a page global; hosts wiring a real DOM
/// publish `toggleMenu` and forward it to the overlay's toggle operation.
pub fn panel_markup(settings_markup: &str, toggle_caption: &str) -> String {
    format!(
        "<div class=\"secret-menu\" aria-hidden=\"true\">\
         <button type=\"button\" class=\"toggle\" onclick=\"toggleMenu()\">\
         <span></span><span></span><span></span>\
         <span class=\"sr-only\">{caption}</span>\
         </button>\
         <div class=\"menu\">{settings}</div>\
         </div>",
        caption = escape_html(toggle_caption),
        settings = settings_markup,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_wraps_settings_in_the_scaffold() {
        let panel = panel_markup("<select></select>", "Secret menu");

        assert!(panel.starts_with("<div class=\"secret-menu\" aria-hidden=\"true\">"));
        assert!(panel.contains("<button type=\"button\" class=\"toggle\" onclick=\"toggleMenu()\">"));
        assert!(panel.contains("<span class=\"sr-only\">Secret menu</span>"));
        assert!(panel.contains("<div class=\"menu\"><select></select></div>"));
    }

    #[test]
    fn toggle_caption_is_escaped() {
        let panel = panel_markup("", "<secret>");
        assert!(panel.contains("<span class=\"sr-only\">&lt;secret&gt;</span>"));
    }

    #[test]
    fn template_carries_the_expected_id() {
        assert!(TEXT_TEMPLATE.contains("id=\"devindex-text\""));
    }

    #[test]
    fn stylesheet_hides_the_menu_until_opened() {
        assert!(STYLESHEET.contains(".secret-menu .menu{display:none"));
        assert!(STYLESHEET.contains(".secret-menu.open .menu{display:block}"));
    }
}
