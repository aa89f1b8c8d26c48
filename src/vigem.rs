/// ViGEmBus backend (Windows-only).
///
/// ViGEmBus is a virtual gamepad bus driver by Nefarius (Benjamin Höglinger-Stelzer)
/// that allows creating virtual Xbox 360 / DualShock 4 controllers. The bus is
/// driven through the `vigem-client` crate, which speaks the driver's IOCTL
/// protocol directly instead of loading ViGEmClient.dll.
///
/// Mapping onto the native client calls:
/// - alloc/connect client: `Client::connect()`
/// - alloc/add target: `Xbox360Wired::new` + `plugin()` + `wait_ready()`
/// - update: `Xbox360Wired::update(&XGamepad)`
/// - remove target: `unplug()`
///
/// Reference: https://github.com/nefarius/ViGEmBus
/// Rust crate: https://github.com/CasualX/vigem-client

#[cfg(target_os = "windows")]
pub mod imp {
    use crate::device::GamepadState;
    use crate::error::{PadCycleError, Result};
    use crate::platform::PadBackend;
    use std::sync::Arc;
    use vigem_client::{Client, TargetId, XButtons, XGamepad, Xbox360Wired};

    pub struct ViGEmBackend;

    /// `None` until connected, and again after disconnect.
    pub struct ClientHandle {
        client: Option<Arc<Client>>,
    }

    /// `vigem-client` binds a target to its client at construction, so the
    /// pad itself only exists between add and free.
    pub struct X360Target {
        pad: Option<Xbox360Wired<Arc<Client>>>,
    }

    impl ViGEmBackend {
        pub fn new() -> Self {
            Self
        }
    }

    impl PadBackend for ViGEmBackend {
        type Client = ClientHandle;
        type Target = X360Target;

        fn alloc_client(&self) -> Result<ClientHandle> {
            Ok(ClientHandle { client: None })
        }

        fn connect(&self, handle: &mut ClientHandle) -> Result<()> {
            let client = Client::connect().map_err(|e| {
                PadCycleError::Connection(format!(
                    "Failed to connect to ViGEmBus ({}). Install it from github.com/nefarius/ViGEmBus/releases",
                    e
                ))
            })?;
            handle.client = Some(Arc::new(client));
            Ok(())
        }

        fn disconnect(&self, handle: &mut ClientHandle) {
            handle.client = None;
        }

        fn free_client(&self, _handle: &mut ClientHandle) {}

        fn alloc_target(&self) -> Result<X360Target> {
            Ok(X360Target { pad: None })
        }

        fn add_target(&self, handle: &mut ClientHandle, target: &mut X360Target) -> Result<()> {
            let client = handle.client.as_ref().ok_or_else(|| {
                PadCycleError::Registration("ViGEmBus client is not connected".into())
            })?;

            let mut pad = Xbox360Wired::new(Arc::clone(client), TargetId::XBOX360_WIRED);
            pad.plugin()
                .map_err(|e| PadCycleError::Registration(format!("plugin failed: {}", e)))?;
            pad.wait_ready()
                .map_err(|e| PadCycleError::Registration(format!("target not ready: {}", e)))?;

            target.pad = Some(pad);
            Ok(())
        }

        fn remove_target(&self, _handle: &mut ClientHandle, target: &mut X360Target) -> Result<()> {
            match target.pad.as_mut() {
                Some(pad) => pad
                    .unplug()
                    .map_err(|e| PadCycleError::Registration(format!("unplug failed: {}", e))),
                None => Ok(()),
            }
        }

        fn free_target(&self, target: &mut X360Target) {
            target.pad = None;
        }

        fn update(
            &self,
            _handle: &mut ClientHandle,
            target: &mut X360Target,
            state: &GamepadState,
        ) -> Result<()> {
            let pad = target
                .pad
                .as_mut()
                .ok_or_else(|| PadCycleError::Update("target is not plugged in".into()))?;

            let report = XGamepad {
                buttons: XButtons { raw: state.buttons },
                left_trigger: state.left_trigger,
                right_trigger: state.right_trigger,
                thumb_lx: state.thumb_lx,
                thumb_ly: state.thumb_ly,
                thumb_rx: state.thumb_rx,
                thumb_ry: state.thumb_ry,
            };
            pad.update(&report)
                .map_err(|e| PadCycleError::Update(e.to_string()))
        }
    }
}
