//! Host command boundary.
//!
//! The plugin cannot link against the game-server runtime directly, so the
//! one piece of host surface it needs — issuing a console command — sits
//! behind a trait the loader implements.

use crate::error::Result;

/// Console command requesting a round restart so the process supervisor
/// reloads the plugin artifact.
pub const ROUND_RESTART_COMMAND: &str = "rnr";

/// Narrow view of the host's command interface.
pub trait HostConsole {
    /// Issue a textual console command to the host. No structured response
    /// is consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects or cannot execute the command.
    fn execute_command(&self, command: &str) -> Result<()>;
}
