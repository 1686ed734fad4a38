// src/overlay/controller.rs
//! The overlay controller.
//!
//! [`Overlay::attach`] is the single entry point: it normalizes the menu
//! declaration, renders all markup, injects it into the host page, and
//! seeds session storage from persisted cookies. The attached overlay then
//! lives as long as the page view does, fed user events through
//! [`Overlay::dispatch`] and driven through [`Overlay::tick`] for its
//! delayed-reload timer.
//!
//! Attach runs **once per page load**. Attaching a second overlay to the
//! same page would duplicate markup and listeners; callers own that
//! guarantee.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::OverlayConfig;
use crate::cookies::{get_cookie, set_cookie, CookiesHandle, InMemoryPageCookies};
use crate::errors::MenuError;
use crate::host::{HostPage, MemoryHost};
use crate::markup::{
    panel_markup, render, style_markup, ControlBinding, SelectBinding, TextBinding,
    ROUTE_MARKER, TEXT_TEMPLATE,
};
use crate::overlay::events::{ControlEvent, MenuVisibility};
use crate::overlay::registry::CallbackRegistry;
use crate::overlay::reload::PendingReload;
use crate::settings::{normalize, Setting, SettingSource};
use crate::storage::{InMemorySessionStorage, SessionStorageHandle};

/// A unique identifier for one attached overlay (diagnostics only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(Uuid);

impl OverlayId {
    /// Creates a new unique overlay ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OverlayId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// External resources one overlay drives.
///
/// All of them are owned by the embedder conceptually; the overlay holds
/// handles. The jar and storage area are shared handles so the embedder can
/// keep inspecting them, the host and registry move into the overlay.
pub struct OverlayServices {
    /// The host page's cookies.
    pub cookies: CookiesHandle,
    /// Session storage mirror target.
    pub session_storage: SessionStorageHandle,
    /// The page itself: injection points and navigation side effects.
    pub host: Box<dyn HostPage>,
    /// Change callbacks, resolved against `exec_on_change` identifiers at
    /// attach time.
    pub callbacks: CallbackRegistry,
}

impl OverlayServices {
    /// Fully in-memory services: a fresh jar, a fresh storage area, a
    /// recording [`MemoryHost`], and an empty registry. The starting point
    /// for tests and headless embedding.
    pub fn in_memory() -> Self {
        Self {
            cookies: InMemoryPageCookies::new().into_handle(),
            session_storage: InMemorySessionStorage::new().into_handle(),
            host: Box::new(MemoryHost::new()),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Replaces the host page.
    pub fn with_host(mut self, host: Box<dyn HostPage>) -> Self {
        self.host = host;
        self
    }

    /// Replaces the callback registry.
    pub fn with_callbacks(mut self, callbacks: CallbackRegistry) -> Self {
        self.callbacks = callbacks;
        self
    }
}

/// An attached secret menu overlay.
pub struct Overlay {
    /// ID of this overlay instance.
    pub id: OverlayId,
    config: OverlayConfig,
    settings: Vec<Setting>,
    /// Control descriptors produced by the markup generator, in render
    /// order. Dispatch resolves events against these.
    bindings: Vec<ControlBinding>,
    visibility: MenuVisibility,
    pending_reload: Option<PendingReload>,
    cookies: CookiesHandle,
    session_storage: SessionStorageHandle,
    host: Box<dyn HostPage>,
    callbacks: CallbackRegistry,
}

impl Overlay {
    /// Attaches the overlay to the host page.
    ///
    /// Initialization order: normalize the declaration, validate keys and
    /// callback identifiers, render all markup, inject stylesheet plus
    /// text-field template plus panel, then seed session storage from
    /// persisted cookies. Validation failures abort **before** anything is
    /// injected, so a broken declaration never leaves a half-built panel in
    /// the page.
    pub fn attach(
        sources: Vec<SettingSource>,
        services: OverlayServices,
        config: OverlayConfig,
    ) -> Result<Self, MenuError> {
        let OverlayServices {
            cookies,
            session_storage,
            mut host,
            callbacks,
        } = services;

        let settings = normalize(sources)?;
        ensure_unique_keys(&settings)?;
        ensure_callbacks_resolve(&settings, &callbacks)?;

        let mut inline = String::new();
        let mut fragments: Vec<String> = Vec::new();
        let mut bindings = Vec::with_capacity(settings.len());
        for setting in &settings {
            let rendered = render(setting, &cookies);
            inline.push_str(&rendered.html);
            if let ControlBinding::Text(text) = &rendered.binding {
                fragments.push(text.fragment.clone());
            }
            bindings.push(rendered.binding);
        }

        // Text fragments are appended after the inline controls, at the end
        // of the panel.
        let mut menu_markup = inline;
        for fragment in &fragments {
            menu_markup.push_str(fragment);
        }

        host.inject_head(&style_markup());
        host.inject_body(TEXT_TEMPLATE);
        host.inject_body(&panel_markup(&menu_markup, &config.toggle_caption));

        let overlay = Self {
            id: OverlayId::new(),
            config,
            settings,
            bindings,
            visibility: MenuVisibility::Closed,
            pending_reload: None,
            cookies,
            session_storage,
            host,
            callbacks,
        };
        overlay.seed_session_storage()?;

        log::debug!(
            "overlay[{}]: attached with {} settings on {}",
            overlay.id,
            overlay.settings.len(),
            overlay.host.name()
        );
        Ok(overlay)
    }

    /// Feeds one user event from the host page into the overlay.
    pub fn dispatch(&mut self, event: ControlEvent) -> Result<(), MenuError> {
        match event {
            ControlEvent::SelectChanged { key, value } => self.on_select_changed(&key, &value),
            ControlEvent::TextChanged { key, value } => self.on_text_changed(&key, &value),
            ControlEvent::LinkClicked { href } => {
                self.on_link_clicked(&href);
                Ok(())
            }
            ControlEvent::ToggleClicked => {
                self.toggle();
                Ok(())
            }
        }
    }

    /// Drives the delayed-reload timer.
    ///
    /// Returns the time remaining until the next scheduled reload, or
    /// `None` when nothing is pending. A due reload fires exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let pending = self.pending_reload?;
        if pending.is_due(now) {
            self.pending_reload = None;
            log::debug!("overlay[{}]: delayed reload firing", self.id);
            self.host.reload();
            return None;
        }
        Some(pending.remaining(now))
    }

    /// Drops a scheduled reload without firing it, e.g. on page teardown.
    pub fn cancel_pending_reload(&mut self) {
        self.pending_reload = None;
    }

    /// Flips the panel between its closed and open states and applies the
    /// result to the host page.
    pub fn toggle(&mut self) {
        self.visibility = self.visibility.flipped();
        self.host.set_menu_open(self.visibility.is_open());
    }

    /// Current panel visibility.
    pub fn visibility(&self) -> MenuVisibility {
        self.visibility
    }

    /// The normalized settings behind the panel, in render order.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// The control descriptors produced at attach time, in render order.
    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    /// The host page the overlay is attached to.
    pub fn host(&self) -> &dyn HostPage {
        self.host.as_ref()
    }

    /// Change handler for select controls.
    ///
    /// Effect order matters and is stable: persist the cookie, run the
    /// change callback, reload if the control asks for it, then hydrate
    /// session storage (which always reloads). A value that fails to decode
    /// in session-storage mode aborts after the cookie write.
    fn on_select_changed(&mut self, key: &str, value: &str) -> Result<(), MenuError> {
        let Some(binding) = self.select_binding(key).cloned() else {
            log::warn!("overlay[{}]: change event for unknown select `{key}`", self.id);
            return Ok(());
        };

        set_cookie(&self.cookies, key, value, self.config.retention_days);

        if let Some(callback) = &binding.exec_on_change {
            self.callbacks.invoke(callback);
        }

        if binding.reload_on_change {
            self.host.reload();
        }

        if binding.session_storage {
            if value.is_empty() {
                log::debug!("overlay[{}]: clearing session storage `{key}`", self.id);
                self.session_storage.remove_item(key)?;
            } else {
                let decoded = BASE64.decode(value.as_bytes()).map_err(|source| {
                    MenuError::ValueDecode {
                        key: key.to_string(),
                        source,
                    }
                })?;
                let payload = String::from_utf8_lossy(&decoded);
                log::debug!("overlay[{}]: hydrating session storage `{key}`", self.id);
                self.session_storage.set_item(key, &payload)?;
            }
            self.host.reload();
        }

        Ok(())
    }

    fn on_text_changed(&mut self, key: &str, value: &str) -> Result<(), MenuError> {
        let known = self.bindings.iter().any(|binding| {
            matches!(binding, ControlBinding::Text(TextBinding { key: k, .. }) if k == key)
        });
        if !known {
            log::warn!("overlay[{}]: input event for unknown field `{key}`", self.id);
            return Ok(());
        }

        set_cookie(&self.cookies, key, value, self.config.retention_days);
        Ok(())
    }

    /// Click handler for links. Only client-side route targets are
    /// intercepted; everything else navigates on its own.
    fn on_link_clicked(&mut self, href: &str) {
        if !href.starts_with(ROUTE_MARKER) {
            return;
        }

        self.host.set_location(href);
        let delay = self.config.reload_delay;
        log::debug!("overlay[{}]: reload in {delay:?} after hash-link click", self.id);
        self.pending_reload = Some(PendingReload::arm(Instant::now(), delay));
    }

    fn select_binding(&self, key: &str) -> Option<&SelectBinding> {
        self.bindings.iter().find_map(|binding| match binding {
            ControlBinding::Select(select) if select.key == key => Some(select),
            _ => None,
        })
    }

    /// Hydrates session storage from persisted cookies for every
    /// session-storage-mode select, without waiting for a change event.
    ///
    /// A cookie that fails to decode is treated as absent; it may predate
    /// an encoding change, and dropping it is better than refusing to
    /// attach.
    fn seed_session_storage(&self) -> Result<(), MenuError> {
        for binding in &self.bindings {
            let ControlBinding::Select(select) = binding else {
                continue;
            };
            if !select.session_storage {
                continue;
            }
            let Some(value) =
                get_cookie(&self.cookies, &select.key).filter(|value| !value.is_empty())
            else {
                continue;
            };

            match BASE64.decode(value.as_bytes()) {
                Ok(decoded) => {
                    let payload = String::from_utf8_lossy(&decoded);
                    log::debug!(
                        "overlay[{}]: seeding session storage `{}`",
                        self.id,
                        select.key
                    );
                    self.session_storage.set_item(&select.key, &payload)?;
                }
                Err(_) => {
                    log::warn!(
                        "overlay[{}]: ignoring undecodable cookie for `{}`",
                        self.id,
                        select.key
                    );
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("id", &self.id)
            .field("settings", &self.settings.len())
            .field("visibility", &self.visibility)
            .field("pending_reload", &self.pending_reload)
            .field("host", &self.host.name())
            .finish()
    }
}

fn ensure_unique_keys(settings: &[Setting]) -> Result<(), MenuError> {
    let mut seen = HashSet::new();
    for setting in settings {
        let Some(key) = setting.key() else { continue };
        if !seen.insert(key.to_string()) {
            return Err(MenuError::DuplicateKey(key.to_string()));
        }
    }
    Ok(())
}

fn ensure_callbacks_resolve(
    settings: &[Setting],
    callbacks: &CallbackRegistry,
) -> Result<(), MenuError> {
    for setting in settings {
        let Setting::Select(select) = setting else {
            continue;
        };
        let Some(callback) = &select.exec_on_change else {
            continue;
        };
        if !callbacks.contains(callback) {
            return Err(MenuError::UnknownCallback(callback.clone()));
        }
    }
    Ok(())
}
