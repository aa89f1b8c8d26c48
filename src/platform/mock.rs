use crate::device::GamepadState;
use crate::error::{PadCycleError, Result};
use crate::platform::PadBackend;
use std::sync::{Arc, Mutex, MutexGuard};

/// One native call as observed by [`MockBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusCall {
    AllocClient,
    Connect,
    Disconnect,
    FreeClient,
    AllocTarget,
    AddTarget,
    RemoveTarget,
    FreeTarget,
    Update(u16),
}

/// Acquire step a [`MockBus`] can be told to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    AllocClient,
    Connect,
    AllocTarget,
    AddTarget,
}

#[derive(Default)]
struct Inner {
    calls: Vec<BusCall>,
    delivered: Vec<u16>,
    fail_at: Option<FailPoint>,
    disconnect_after: Option<usize>,
}

/// In-memory bus that records every call in order.
///
/// Used for development off Windows and by the test suite to check acquire and
/// release ordering without a kernel driver.
pub struct MockBus {
    inner: Mutex<Inner>,
}

pub struct MockClient {
    pub connected: bool,
}

pub struct MockTarget {
    pub added: bool,
}

impl MockBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner::default()),
        })
    }

    pub fn failing_at(point: FailPoint) -> Arc<Self> {
        let bus = Self::new();
        bus.lock().fail_at = Some(point);
        bus
    }

    /// Accept `updates` reports, then behave as if the bus went away.
    pub fn disconnect_after(updates: usize) -> Arc<Self> {
        let bus = Self::new();
        bus.lock().disconnect_after = Some(updates);
        bus
    }

    pub fn calls(&self) -> Vec<BusCall> {
        self.lock().calls.clone()
    }

    /// Button words of every report the bus accepted.
    pub fn delivered(&self) -> Vec<u16> {
        self.lock().delivered.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn record(&self, call: BusCall, point: Option<FailPoint>) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(call);
        match (point, inner.fail_at) {
            (Some(p), Some(fail)) if p == fail => Err(match p {
                FailPoint::AllocClient => PadCycleError::Allocation("mock client".into()),
                FailPoint::Connect => PadCycleError::Connection("mock bus refused".into()),
                FailPoint::AllocTarget => PadCycleError::Allocation("mock target".into()),
                FailPoint::AddTarget => PadCycleError::Registration("mock bus rejected".into()),
            }),
            _ => Ok(()),
        }
    }
}

impl PadBackend for MockBus {
    type Client = MockClient;
    type Target = MockTarget;

    fn alloc_client(&self) -> Result<MockClient> {
        self.record(BusCall::AllocClient, Some(FailPoint::AllocClient))?;
        Ok(MockClient { connected: false })
    }

    fn connect(&self, client: &mut MockClient) -> Result<()> {
        self.record(BusCall::Connect, Some(FailPoint::Connect))?;
        client.connected = true;
        Ok(())
    }

    fn disconnect(&self, client: &mut MockClient) {
        let _ = self.record(BusCall::Disconnect, None);
        client.connected = false;
    }

    fn free_client(&self, _client: &mut MockClient) {
        let _ = self.record(BusCall::FreeClient, None);
    }

    fn alloc_target(&self) -> Result<MockTarget> {
        self.record(BusCall::AllocTarget, Some(FailPoint::AllocTarget))?;
        Ok(MockTarget { added: false })
    }

    fn add_target(&self, client: &mut MockClient, target: &mut MockTarget) -> Result<()> {
        self.record(BusCall::AddTarget, Some(FailPoint::AddTarget))?;
        if !client.connected {
            return Err(PadCycleError::Registration("client not connected".into()));
        }
        target.added = true;
        Ok(())
    }

    fn remove_target(&self, _client: &mut MockClient, target: &mut MockTarget) -> Result<()> {
        self.record(BusCall::RemoveTarget, None)?;
        target.added = false;
        Ok(())
    }

    fn free_target(&self, _target: &mut MockTarget) {
        let _ = self.record(BusCall::FreeTarget, None);
    }

    fn update(
        &self,
        client: &mut MockClient,
        target: &mut MockTarget,
        state: &GamepadState,
    ) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(BusCall::Update(state.buttons));
        if let Some(limit) = inner.disconnect_after {
            if inner.delivered.len() >= limit {
                client.connected = false;
                return Err(PadCycleError::Update("mock bus disconnected".into()));
            }
        }
        if !client.connected || !target.added {
            return Err(PadCycleError::Update("target not plugged in".into()));
        }
        inner.delivered.push(state.buttons);
        Ok(())
    }
}
