//! Control descriptors the markup generator hands to the controller.
//!
//! Generated markup is inert text; what makes the controls live is the
//! wiring the controller performs afterwards. Each rendered setting carries
//! one [`ControlBinding`] describing exactly what to wire, so nothing has
//! to be re-discovered from the injected document later.

/// Prefix of link targets the overlay intercepts (client-side routes).
pub const ROUTE_MARKER: &str = "/#";

/// One rendered setting: inline panel markup plus its control binding.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSetting {
    /// Markup to place inside the panel. Empty for text settings, whose
    /// template-instantiated fragment is carried by the binding instead.
    pub html: String,
    pub binding: ControlBinding,
}

/// Everything needed to wire one generated control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlBinding {
    Select(SelectBinding),
    Links(Vec<LinkBinding>),
    Text(TextBinding),
}

/// Wiring data for a select control.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBinding {
    /// Cookie key the control persists under.
    pub key: String,
    pub session_storage: bool,
    pub reload_on_change: bool,
    pub exec_on_change: Option<String>,
    /// Option values exactly as they appear in the markup (encoded).
    pub options: Vec<SelectOptionBinding>,
    /// Value the control displays at attach time: the persisted cookie
    /// value, or `"default"` when none is set.
    pub initial_value: String,
}

/// One option of a select control, with its encoded markup value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptionBinding {
    pub title: String,
    pub value: String,
}

/// Wiring data for one link in a links list.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkBinding {
    pub title: String,
    pub href: String,
    /// True for client-side-routing targets (see [`ROUTE_MARKER`]) whose
    /// clicks the overlay intercepts and follows with a delayed reload.
    pub intercept: bool,
}

/// Wiring data for a text-field control.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBinding {
    /// Cookie key the field persists under.
    pub key: String,
    /// Template-instantiated fragment to append into the panel.
    pub fragment: String,
    /// Persisted cookie value at attach time, empty when none is set.
    pub initial_value: String,
}
