//! Overlay event types.
//!
//! This module defines the events a host page forwards into the overlay and
//! the visibility state the toggle cycles through. Events correspond
//! one-to-one to the listeners an embedder wires on the generated controls.
//!
//! # Main Types
//!
//! - [`ControlEvent`]: User events from the generated controls.
//! - [`MenuVisibility`]: The two-state open/closed machine of the panel.

use std::fmt::Display;

/// A user event forwarded from one of the generated controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// A select control committed a new value. `value` is the encoded
    /// option value exactly as it appears in the markup.
    SelectChanged { key: String, value: String },
    /// A text field's content changed.
    TextChanged { key: String, value: String },
    /// An anchor in a links list was clicked. `href` is the anchor target.
    LinkClicked { href: String },
    /// The hamburger toggle was clicked.
    ToggleClicked,
}

impl Display for ControlEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlEvent::SelectChanged { key, .. } => write!(f, "SelectChanged({key})"),
            ControlEvent::TextChanged { key, .. } => write!(f, "TextChanged({key})"),
            ControlEvent::LinkClicked { href } => write!(f, "LinkClicked({href})"),
            ControlEvent::ToggleClicked => write!(f, "ToggleClicked"),
        }
    }
}

/// Panel visibility: strictly two states, flipped by the toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuVisibility {
    #[default]
    Closed,
    Open,
}

impl MenuVisibility {
    /// The other state.
    pub fn flipped(self) -> Self {
        match self {
            MenuVisibility::Closed => MenuVisibility::Open,
            MenuVisibility::Open => MenuVisibility::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, MenuVisibility::Open)
    }
}

impl Display for MenuVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuVisibility::Closed => write!(f, "Closed"),
            MenuVisibility::Open => write!(f, "Open"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_flips_back_and_forth() {
        let state = MenuVisibility::default();
        assert_eq!(state, MenuVisibility::Closed);
        assert!(!state.is_open());

        let flipped = state.flipped();
        assert_eq!(flipped, MenuVisibility::Open);
        assert!(flipped.is_open());

        assert_eq!(flipped.flipped(), state);
    }

    #[test]
    fn events_display_their_subject() {
        let event = ControlEvent::SelectChanged {
            key: "mock-user".to_string(),
            value: "premium".to_string(),
        };
        assert_eq!(event.to_string(), "SelectChanged(mock-user)");
        assert_eq!(ControlEvent::ToggleClicked.to_string(), "ToggleClicked");
    }
}
