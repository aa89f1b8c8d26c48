use crate::device::GamepadState;
use crate::error::Result;
use std::sync::Arc;

/// The virtual-bus client library: one call per native entry point.
///
/// Handles are plain values owned by the caller; `session` wraps them in
/// guards that release them in reverse acquire order.
pub trait PadBackend: Send + Sync + 'static {
    type Client: Send + 'static;
    type Target: Send + 'static;

    fn alloc_client(&self) -> Result<Self::Client>;
    fn connect(&self, client: &mut Self::Client) -> Result<()>;
    fn disconnect(&self, client: &mut Self::Client);
    fn free_client(&self, client: &mut Self::Client);

    fn alloc_target(&self) -> Result<Self::Target>;
    fn add_target(&self, client: &mut Self::Client, target: &mut Self::Target) -> Result<()>;
    fn remove_target(&self, client: &mut Self::Client, target: &mut Self::Target) -> Result<()>;
    fn free_target(&self, target: &mut Self::Target);

    fn update(
        &self,
        client: &mut Self::Client,
        target: &mut Self::Target,
        state: &GamepadState,
    ) -> Result<()>;
}

pub mod mock;
#[cfg(not(target_os = "windows"))]
mod unsupported;

#[cfg(target_os = "windows")]
pub type PlatformBackend = crate::vigem::imp::ViGEmBackend;
#[cfg(not(target_os = "windows"))]
pub type PlatformBackend = unsupported::UnsupportedBackend;

/// Create the platform-appropriate backend.
pub fn create_platform() -> Arc<PlatformBackend> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(crate::vigem::imp::ViGEmBackend::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(unsupported::UnsupportedBackend::new())
    }
}
