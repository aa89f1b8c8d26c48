use crate::device::GamepadState;
use crate::error::{PadCycleError, Result};
use crate::platform::PadBackend;

/// Non-Windows stub. ViGEmBus only exists on Windows, so connecting fails.
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self
    }

    fn unsupported() -> PadCycleError {
        PadCycleError::PlatformNotSupported(format!(
            "ViGEmBus is only available on Windows (running on {})",
            std::env::consts::OS
        ))
    }
}

impl PadBackend for UnsupportedBackend {
    type Client = ();
    type Target = ();

    fn alloc_client(&self) -> Result<()> {
        Ok(())
    }

    fn connect(&self, _client: &mut ()) -> Result<()> {
        Err(Self::unsupported())
    }

    fn disconnect(&self, _client: &mut ()) {}

    fn free_client(&self, _client: &mut ()) {}

    fn alloc_target(&self) -> Result<()> {
        Err(Self::unsupported())
    }

    fn add_target(&self, _client: &mut (), _target: &mut ()) -> Result<()> {
        Err(Self::unsupported())
    }

    fn remove_target(&self, _client: &mut (), _target: &mut ()) -> Result<()> {
        Err(Self::unsupported())
    }

    fn free_target(&self, _target: &mut ()) {}

    fn update(&self, _client: &mut (), _target: &mut (), _state: &GamepadState) -> Result<()> {
        Err(Self::unsupported())
    }
}
