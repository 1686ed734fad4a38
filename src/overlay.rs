// src/overlay.rs
//! The overlay runtime: attach, event dispatch, visibility, and the
//! delayed-reload timer.
//!
//! [`Overlay::attach`] consumes a declaration (see [`crate::settings`]),
//! injects the generated markup into a [`crate::host::HostPage`], and
//! returns the live controller. Hosts forward user interaction as
//! [`ControlEvent`]s and drive the timer by calling [`Overlay::tick`]
//! from their own scheduler.

mod controller;
mod events;
mod registry;
mod reload;

pub use controller::Overlay;
pub use controller::OverlayId;
pub use controller::OverlayServices;

pub use events::ControlEvent;
pub use events::MenuVisibility;

pub use registry::CallbackRegistry;

pub use reload::PendingReload;
