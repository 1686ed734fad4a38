//! Markup: pure generation of the overlay's panel, controls, and static
//! assets, plus the [`ControlBinding`] descriptors that tell the controller
//! what to wire.

mod assets;
mod bindings;
mod generate;
mod text_field;

pub use assets::panel_markup;
pub use assets::style_markup;
pub use assets::STYLESHEET;
pub use assets::TEXT_TEMPLATE;

pub use bindings::ControlBinding;
pub use bindings::LinkBinding;
pub use bindings::RenderedSetting;
pub use bindings::SelectBinding;
pub use bindings::SelectOptionBinding;
pub use bindings::TextBinding;
pub use bindings::ROUTE_MARKER;

pub use generate::render;
