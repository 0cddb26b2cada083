//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by launched tasks.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: the work runner (start/stop/fail), [`Task::stop`](crate::Task::stop)
//!   and callback invocation (panics).
//! - **Consumers**: anyone holding a receiver from [`Launcher::subscribe`](crate::Launcher::subscribe).
//!
//! Tasks launched with the free functions [`go`](crate::go) and
//! [`go_blocking`](crate::go_blocking) have no bus and publish nothing.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
