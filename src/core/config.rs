//! # Launcher configuration.
//!
//! Provides [`Config`], the settings shared by every task started through one
//! [`Launcher`](crate::Launcher).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by [`Config::bus_capacity_clamped`]
//! - `default_name = ""` → replaced by `"task"` by [`Config::default_name`]

use std::borrow::Cow;

/// Name used when neither the work nor the config supplies one.
pub(crate) const FALLBACK_NAME: &str = "task";

/// Configuration for a [`Launcher`](crate::Launcher).
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped)
/// - `default_name`: Name given to work launched without one (logs/events only)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the lifecycle event bus.
    ///
    /// Receivers that lag behind more than `bus_capacity` events observe
    /// `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Name given to closures launched with [`Launcher::launch_fn`](crate::Launcher::launch_fn).
    pub default_name: Cow<'static, str>,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the configured default name, falling back to `"task"` when empty.
    #[inline]
    pub fn default_name(&self) -> &str {
        if self.default_name.is_empty() {
            FALLBACK_NAME
        } else {
            &self.default_name
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `default_name = "task"`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            default_name: Cow::Borrowed(FALLBACK_NAME),
        }
    }
}
