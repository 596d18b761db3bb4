// common.rs — diagnostic output and fatal error handling

use crate::q_shared::{ERR_DROP, ERR_FATAL};

pub const LOG_TARGET: &str = "edictpool";

// ============================================================
// Com_Printf / Com_DPrintf / Com_Error
// ============================================================

/// General-purpose print, emitted as an `info` event.
pub fn com_printf(msg: &str) {
    tracing::info!(target: LOG_TARGET, "{}", msg.trim_end());
}

/// Developer-only print, gated on the "developer" cvar.
pub fn com_dprintf(msg: &str) {
    if crate::cvar::cvar_variable_value("developer") == 0.0 {
        tracing::debug!(target: LOG_TARGET, "{}", msg.trim_end());
        return;
    }
    com_printf(msg);
}

/// Engine error handler. Never returns.
///
/// `ERR_FATAL` and `ERR_DROP` both unwind out of the game; with the
/// release profile's `panic = "abort"` that terminates the process.
pub fn com_error(code: i32, msg: &str) -> ! {
    let msg = msg.trim_end();
    match code {
        ERR_FATAL => {
            tracing::error!(target: LOG_TARGET, "Error: {}", msg);
            panic!("Fatal error: {}", msg);
        }
        ERR_DROP => {
            tracing::error!(target: LOG_TARGET, "********************\nERROR: {}\n********************", msg);
            panic!("Dropped: {}", msg);
        }
        _ => {
            tracing::info!(target: LOG_TARGET, "{}", msg);
            std::process::exit(0);
        }
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
