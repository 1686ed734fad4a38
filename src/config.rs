//! Overlay configuration.
//!
//! `OverlayConfig` controls the tunable behavior of a single
//! [`Overlay`](crate::overlay::Overlay): how long persisted choices are
//! retained, how long the overlay waits before forcing a reload after a
//! hash-link click, and the screen-reader caption on the toggle button.
//!
//! `OverlayConfig` provides sensible defaults via [`Default`] and a fluent
//! [`OverlayConfig::builder()`] for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use devindex::config::OverlayConfig;
//! let cfg = OverlayConfig::default();
//! assert_eq!(cfg.retention_days, 30);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use devindex::config::OverlayConfig;
//! use std::time::Duration;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = OverlayConfig::builder()
//!     .retention_days(7)
//!     .reload_delay(Duration::from_millis(250))
//!     .toggle_caption("Developer menu")
//!     .build()?; // returns Result<OverlayConfig, OverlayConfigError>
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation can return [`OverlayConfigError`] if values are invalid
//! (e.g. `retention_days` outside `1..=36_500`, or a blank `toggle_caption`).

use std::fmt;
use std::time::Duration;

const DEFAULT_RETENTION_DAYS: u32 = 30;
const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_TOGGLE_CAPTION: &str = "Secret menu";

// Expiry dates computed from the window must stay inside the range `time`
// can represent (year 9999). A hundred years of days is the cap.
const MAX_RETENTION_DAYS: u32 = 36_500;

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Retention window, in days, for cookies written on behalf of the
    /// overlay's controls (default: 30, validated range `1..=36_500`).
    pub retention_days: u32,
    /// Delay between an intercepted hash-link click and the forced reload
    /// that follows it (default: 500ms).
    pub reload_delay: Duration,
    /// Screen-reader caption rendered inside the toggle button.
    pub toggle_caption: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            reload_delay: DEFAULT_RELOAD_DELAY,
            toggle_caption: DEFAULT_TOGGLE_CAPTION.to_string(),
        }
    }
}

impl OverlayConfig {
    pub fn builder() -> OverlayConfigBuilder {
        OverlayConfigBuilder::default()
    }
}

/// Builder for [`OverlayConfig`].
#[derive(Debug, Clone)]
pub struct OverlayConfigBuilder {
    inner: OverlayConfig,
}

impl Default for OverlayConfigBuilder {
    fn default() -> Self {
        Self { inner: OverlayConfig::default() }
    }
}

impl OverlayConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut OverlayConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn retention_days(self, days: u32) -> Self { self.map(|c| c.retention_days = days) }
    pub fn reload_delay(self, delay: Duration) -> Self { self.map(|c| c.reload_delay = delay) }
    pub fn toggle_caption<S: Into<String>>(self, caption: S) -> Self { self.map(|c| c.toggle_caption = caption.into()) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut OverlayConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<OverlayConfig, OverlayConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone)]
pub enum OverlayConfigError {
    ZeroRetention,
    ExcessiveRetention(u32),
    BlankCaption,
}

impl fmt::Display for OverlayConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayConfigError::ZeroRetention =>
                write!(f, "retention_days must be at least 1"),
            OverlayConfigError::ExcessiveRetention(days) =>
                write!(f, "retention_days {days} is out of range (max {MAX_RETENTION_DAYS})"),
            OverlayConfigError::BlankCaption =>
                write!(f, "toggle_caption must not be blank"),
        }
    }
}
impl std::error::Error for OverlayConfigError {}

fn validate(c: &OverlayConfig) -> Result<(), OverlayConfigError> {
    if c.retention_days == 0 {
        return Err(OverlayConfigError::ZeroRetention);
    }
    if c.retention_days > MAX_RETENTION_DAYS {
        return Err(OverlayConfigError::ExcessiveRetention(c.retention_days));
    }
    if c.toggle_caption.trim().is_empty() {
        return Err(OverlayConfigError::BlankCaption);
    }
    Ok(())
}
