//! Host-page seam.
//!
//! The overlay never touches a document directly; everything it does to the
//! page goes through [`HostPage`]. An embedder bridging to a real browser
//! forwards these calls to the DOM (append to `<head>`/`<body>`, trigger
//! `location.reload()`, and so on). [`MemoryHost`] records the calls
//! instead, which is what tests and headless runs use.

use std::any::Any;

/// What the overlay needs from the page it is injected into: markup
/// injection points and navigation side effects.
pub trait HostPage: Send {
    /// Name of the host implementation (diagnostics).
    fn name(&self) -> &str;

    /// Returns a type-erased reference to the host, for downcasting to a
    /// concrete implementation.
    fn as_any(&self) -> &dyn Any;

    /// Appends markup to the document head.
    fn inject_head(&mut self, html: &str);

    /// Appends markup to the document body.
    fn inject_body(&mut self, html: &str);

    /// Forces a full page reload.
    fn reload(&mut self);

    /// Client-side navigation to `href`, without a page load.
    fn set_location(&mut self, href: &str);

    /// Applies the overlay's open/closed visual state to the injected panel.
    fn set_menu_open(&mut self, open: bool);
}

/// Recording host that performs no real document work.
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Markup appended to the head, in call order.
    pub head: Vec<String>,
    /// Markup appended to the body, in call order.
    pub body: Vec<String>,
    /// Number of forced reloads.
    pub reloads: usize,
    /// Last client-side navigation target.
    pub location: Option<String>,
    /// Current panel state as last applied by the overlay.
    pub menu_open: bool,
}

impl MemoryHost {
    /// Creates a host with nothing recorded yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostPage for MemoryHost {
    fn name(&self) -> &str {
        "MemoryHost"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn inject_head(&mut self, html: &str) {
        self.head.push(html.to_string());
    }

    fn inject_body(&mut self, html: &str) {
        self.body.push(html.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn set_location(&mut self, href: &str) {
        self.location = Some(href.to_string());
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_host_records_all_effects() {
        let mut host = MemoryHost::new();
        host.inject_head("<style></style>");
        host.inject_body("<div></div>");
        host.reload();
        host.reload();
        host.set_location("/#/review/8");
        host.set_menu_open(true);

        assert_eq!(host.head, vec!["<style></style>".to_string()]);
        assert_eq!(host.body, vec!["<div></div>".to_string()]);
        assert_eq!(host.reloads, 2);
        assert_eq!(host.location.as_deref(), Some("/#/review/8"));
        assert!(host.menu_open);
    }

    #[test]
    fn memory_host_downcasts_through_as_any() {
        let host: Box<dyn HostPage> = Box::new(MemoryHost::new());
        assert_eq!(host.name(), "MemoryHost");
        assert!(host.as_any().downcast_ref::<MemoryHost>().is_some());
    }
}
