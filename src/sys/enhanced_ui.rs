use tracing::warn;

use super::window_server::{WindowServer, pid_t};

/// Runs `f` with the app's enhanced user interface flag switched off.
///
/// Some apps animate or refuse frame changes while the flag is on. The
/// original state is restored after `f` returns, whatever `f` produced.
pub fn with_enhanced_ui_disabled<S, F, R>(server: &mut S, pid: pid_t, f: F) -> R
where
    S: WindowServer + ?Sized,
    F: FnOnce(&mut S) -> R,
{
    let original_state = match server.enhanced_ui(pid) {
        Ok(state) => state,
        Err(error) => {
            warn!("Failed to read Enhanced User Interface: {error}");
            false
        }
    };

    if original_state {
        if let Err(error) = server.set_enhanced_ui(pid, false) {
            warn!("Failed to disable Enhanced User Interface: {error}");
        }
    }

    let result = f(server);

    if original_state {
        if let Err(error) = server.set_enhanced_ui(pid, true) {
            warn!("Failed to restore Enhanced User Interface: {error}");
        }
    }

    result
}
