use tokio::runtime::Handle;

use crate::{core::Config, error::RuntimeError, events::Bus};
use super::launcher::Launcher;

/// Builder for constructing a [`Launcher`] with optional pieces supplied by the caller.
pub struct LauncherBuilder {
    cfg: Config,
    runtime: Option<Handle>,
    bus: Option<Bus>,
}

impl LauncherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            runtime: None,
            bus: None,
        }
    }

    /// Spawns work on the given runtime instead of the one entered at build time.
    ///
    /// Needed when the launcher is built (or used) from a thread that is not
    /// inside a Tokio runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Publishes lifecycle events on an existing bus.
    ///
    /// Lets several launchers share one stream of events. When unset, a new bus
    /// with `Config::bus_capacity` is created.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the launcher.
    ///
    /// ### Errors
    /// [`RuntimeError::NoRuntime`] if no runtime handle was supplied and the
    /// current thread is not inside a Tokio runtime.
    pub fn build(self) -> Result<Launcher, RuntimeError> {
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?,
        };
        let bus = self
            .bus
            .unwrap_or_else(|| Bus::new(self.cfg.bus_capacity_clamped()));

        Ok(Launcher::new_internal(self.cfg, bus, runtime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_outside_runtime_fails() {
        let err = LauncherBuilder::new(Config::default()).build().unwrap_err();
        assert_eq!(err, RuntimeError::NoRuntime);
    }

    #[test]
    fn explicit_runtime_allows_build_outside_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let launcher = LauncherBuilder::new(Config::default())
            .with_runtime(rt.handle().clone())
            .build();
        assert!(launcher.is_ok());
    }

    #[tokio::test]
    async fn shared_bus_is_used() {
        let bus = Bus::new(4);
        let launcher = LauncherBuilder::new(Config::default())
            .with_bus(bus.clone())
            .build()
            .unwrap();

        let _rx = launcher.subscribe();
        assert_eq!(bus.receiver_count(), 1);
    }
}
