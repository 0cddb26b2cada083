//! Runtime core: launching and driving work.
//!
//! The public API from this module is [`Launcher`] (with its [`LauncherBuilder`]
//! and [`Config`]) and the free functions [`go`] / [`go_blocking`].
//!
//! Internal modules:
//! - [`launcher`]: spawns work and hands back the [`Task`](crate::Task) handle;
//! - [`runner`]: drives one unit of work, contains panics, runs the completion sequence;
//! - [`builder`]: assembles a launcher from config, runtime handle and bus;
//! - [`config`]: launcher settings.

mod builder;
pub(crate) mod config;
mod launcher;
mod runner;

pub use builder::LauncherBuilder;
pub use config::Config;
pub use launcher::{Launcher, go, go_blocking};
