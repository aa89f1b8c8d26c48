use crate::config::Settings;
use crate::error::Result;
use crate::input_loop::{InputLoop, LoopExit, LoopStats};
use crate::platform::PadBackend;
use crate::session::Session;
use std::future::Future;
use std::sync::Arc;

/// Plug in a virtual pad, cycle patterns until `shutdown` resolves (or the
/// loop dies), then tear the pad down.
///
/// Setup failures return immediately after releasing whatever was acquired.
/// The session is always dropped before this returns.
pub async fn run<B, F>(backend: Arc<B>, settings: &Settings, shutdown: F) -> Result<LoopStats>
where
    B: PadBackend,
    F: Future<Output = ()>,
{
    let timing = settings.timing()?;
    let session = Session::open(backend)?;

    let input_loop = InputLoop::start(session, timing);
    let outcome = input_loop.run_until(shutdown).await?;

    drop(outcome.session);

    match outcome.exit {
        LoopExit::Cancelled => Ok(outcome.stats),
        LoopExit::Failed(e) => Err(e),
    }
}

/// Resolves on SIGINT/SIGTERM (Ctrl+C on Windows).
///
/// If a handler cannot be installed the error is logged and this resolves
/// right away.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to register SIGTERM handler: {}", e);
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to register SIGINT handler: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => log::info!("Received SIGTERM"),
            _ = sigint.recv() => log::info!("Received SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Error waiting for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PadCycleError;
    use crate::platform::mock::{FailPoint, MockBus};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn invalid_timing_touches_nothing() {
        let bus = MockBus::new();
        let settings = Settings {
            dpad_interval_ms: 0,
            ..Settings::default()
        };
        let result = run(Arc::clone(&bus), &settings, std::future::pending()).await;
        assert!(matches!(result, Err(PadCycleError::Config(_))));
        assert!(bus.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn setup_failure_skips_the_loop() {
        let bus = MockBus::failing_at(FailPoint::Connect);
        let result = run(Arc::clone(&bus), &Settings::default(), std::future::pending()).await;
        assert!(matches!(result, Err(PadCycleError::Connection(_))));
        assert!(bus.delivered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_intervals_are_honoured() {
        let bus = MockBus::new();
        let settings = Settings {
            face_interval_ms: 1_000,
            dpad_interval_ms: 250,
        };
        let stats = run(
            Arc::clone(&bus),
            &settings,
            tokio::time::sleep(Duration::from_millis(1_100)),
        )
        .await
        .unwrap();
        assert_eq!(stats.face_ticks, 1);
        assert_eq!(stats.dpad_ticks, 4);
    }
}
