use anyhow::{Context, Result};
use nwm_core::{ExitReason, Manager};
use std::os::unix::process::CommandExt;
use std::process::Command;
use xlib_display_server::{XlibDisplayServer, XlibWindowHandle};

fn main() -> Result<()> {
    let log_guard = nwm::utils::log::setup_logging();
    tracing::info!("nwm booting...");

    let config = nwm::load();

    let rt = tokio::runtime::Runtime::new().context("couldn't init Tokio runtime")?;
    let _rt_guard = rt.enter();

    let manager = Manager::<XlibWindowHandle, nwm::Config, XlibDisplayServer>::new(config)
        .context("couldn't take over the display")?;
    manager.register_child_hook();

    let reason = rt.block_on(manager.start_event_loop());
    tracing::info!("Completed: {:?}", reason);

    if reason == ExitReason::Restart {
        // exec never runs destructors, flush the log file first.
        drop(log_guard);
        let err = restart();
        return Err(err).context("couldn't restart nwm");
    }
    Ok(())
}

/// Replaces the process with a fresh copy of the running binary. Only returns on failure.
fn restart() -> std::io::Error {
    let program = match std::env::current_exe() {
        Ok(program) => program,
        Err(err) => return err,
    };
    Command::new(program).args(std::env::args_os().skip(1)).exec()
}
