use crate::device::GamepadState;
use crate::error::Result;
use crate::platform::PadBackend;
use std::sync::Arc;

/// Connected bus client. Disconnects and frees itself on drop.
pub struct BusClient<B: PadBackend> {
    backend: Arc<B>,
    raw: B::Client,
}

impl<B: PadBackend> BusClient<B> {
    /// Allocate a client and connect it to the bus.
    pub fn open(backend: Arc<B>) -> Result<Self> {
        let mut raw = backend.alloc_client()?;
        if let Err(e) = backend.connect(&mut raw) {
            backend.free_client(&mut raw);
            return Err(e);
        }
        log::info!("Connected to virtual bus");
        Ok(Self { backend, raw })
    }
}

impl<B: PadBackend> Drop for BusClient<B> {
    fn drop(&mut self) {
        self.backend.disconnect(&mut self.raw);
        self.backend.free_client(&mut self.raw);
        log::debug!("Bus client released");
    }
}

/// Allocated, not yet registered, pad descriptor. Freed on drop.
pub struct VirtualTarget<B: PadBackend> {
    backend: Arc<B>,
    raw: B::Target,
}

impl<B: PadBackend> VirtualTarget<B> {
    pub fn create(backend: Arc<B>) -> Result<Self> {
        let raw = backend.alloc_target()?;
        Ok(Self { backend, raw })
    }
}

impl<B: PadBackend> Drop for VirtualTarget<B> {
    fn drop(&mut self) {
        self.backend.free_target(&mut self.raw);
        log::debug!("Virtual target freed");
    }
}

/// A virtual Xbox 360 pad plugged into the bus.
///
/// Drop order is the reverse of [`Session::open`]: unregister, free the target,
/// then disconnect and free the client. `target` must stay declared before
/// `client` for that to hold.
pub struct Session<B: PadBackend> {
    target: VirtualTarget<B>,
    client: BusClient<B>,
}

impl<B: PadBackend> Session<B> {
    /// Open the client, create the target, and register it.
    ///
    /// On failure everything acquired so far is released in reverse order.
    pub fn open(backend: Arc<B>) -> Result<Self> {
        let mut client = BusClient::open(Arc::clone(&backend))?;
        let mut target = VirtualTarget::create(Arc::clone(&backend))?;
        backend.add_target(&mut client.raw, &mut target.raw)?;
        log::info!("Virtual Xbox 360 controller plugged in");
        Ok(Self { target, client })
    }

    pub fn update(&mut self, state: &GamepadState) -> Result<()> {
        let backend = &self.client.backend;
        backend.update(&mut self.client.raw, &mut self.target.raw, state)
    }
}

impl<B: PadBackend> Drop for Session<B> {
    fn drop(&mut self) {
        let backend = Arc::clone(&self.client.backend);
        if let Err(e) = backend.remove_target(&mut self.client.raw, &mut self.target.raw) {
            log::warn!("Failed to unplug virtual controller: {}", e);
        }
        log::info!("Virtual controller removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PadCycleError;
    use crate::platform::mock::{BusCall, FailPoint, MockBus};

    #[test]
    fn full_session_releases_in_reverse() {
        let bus = MockBus::new();
        let session = Session::open(Arc::clone(&bus)).unwrap();
        drop(session);
        assert_eq!(
            bus.calls(),
            vec![
                BusCall::AllocClient,
                BusCall::Connect,
                BusCall::AllocTarget,
                BusCall::AddTarget,
                BusCall::RemoveTarget,
                BusCall::FreeTarget,
                BusCall::Disconnect,
                BusCall::FreeClient,
            ]
        );
    }

    #[test]
    fn client_allocation_failure_releases_nothing() {
        let bus = MockBus::failing_at(FailPoint::AllocClient);
        let result = Session::open(Arc::clone(&bus));
        assert!(matches!(result, Err(PadCycleError::Allocation(_))));
        assert_eq!(bus.calls(), vec![BusCall::AllocClient]);
    }

    #[test]
    fn connect_failure_only_frees_client() {
        let bus = MockBus::failing_at(FailPoint::Connect);
        let result = Session::open(Arc::clone(&bus));
        assert!(matches!(result, Err(PadCycleError::Connection(_))));
        assert_eq!(
            bus.calls(),
            vec![BusCall::AllocClient, BusCall::Connect, BusCall::FreeClient]
        );
    }

    #[test]
    fn target_allocation_failure_closes_client() {
        let bus = MockBus::failing_at(FailPoint::AllocTarget);
        let result = Session::open(Arc::clone(&bus));
        assert!(matches!(result, Err(PadCycleError::Allocation(_))));
        assert_eq!(
            bus.calls(),
            vec![
                BusCall::AllocClient,
                BusCall::Connect,
                BusCall::AllocTarget,
                BusCall::Disconnect,
                BusCall::FreeClient,
            ]
        );
    }

    #[test]
    fn registration_failure_never_unregisters() {
        let bus = MockBus::failing_at(FailPoint::AddTarget);
        let result = Session::open(Arc::clone(&bus));
        assert!(matches!(result, Err(PadCycleError::Registration(_))));
        let calls = bus.calls();
        assert!(!calls.contains(&BusCall::RemoveTarget));
        assert_eq!(
            calls,
            vec![
                BusCall::AllocClient,
                BusCall::Connect,
                BusCall::AllocTarget,
                BusCall::AddTarget,
                BusCall::FreeTarget,
                BusCall::Disconnect,
                BusCall::FreeClient,
            ]
        );
    }

    #[test]
    fn update_reaches_the_bus() {
        let bus = MockBus::new();
        let mut session = Session::open(Arc::clone(&bus)).unwrap();
        let state = GamepadState {
            buttons: 0x1001,
            ..Default::default()
        };
        session.update(&state).unwrap();
        assert_eq!(bus.delivered(), vec![0x1001]);
    }
}
