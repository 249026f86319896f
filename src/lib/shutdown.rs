use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::*;

use crate::error::Result;

/// Cloneable flag shared by the reader thread and the ingest loop.
///
/// Both sides poll it between units of work and leave their loops once it is set.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Triggers this handle on Ctrl-C (SIGINT), can only be installed once per process.
    #[instrument(level = "debug", skip(self))]
    pub fn install_interrupt_handler(&self) -> Result<()> {
        let shutdown = self.clone();
        ctrlc::set_handler(move || {
            info!("Interrupt received, shutting down");
            shutdown.trigger();
        })?;

        Ok(())
    }
}
