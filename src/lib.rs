pub mod config;
pub mod device;
pub mod error;
pub mod input_loop;
pub mod lifecycle;
pub mod pattern;
pub mod platform;
pub mod session;
pub mod vigem;

use config::Settings;
use std::process::ExitCode;

pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("Ignoring config file, using default intervals: {}", e);
        Settings::default()
    });

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let backend = platform::create_platform();
    match runtime.block_on(lifecycle::run(backend, &settings, lifecycle::shutdown_signal())) {
        Ok(stats) => {
            log::info!(
                "Shut down cleanly after {} face and {} d-pad ticks",
                stats.face_ticks,
                stats.dpad_ticks
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
