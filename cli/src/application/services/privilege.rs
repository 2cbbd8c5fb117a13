//! Application service — privilege gate for mutating commands.

use crate::application::ports::PrivilegeCheck;
use crate::domain::error::PrivilegeError;

/// Fail before any side effect unless the process is privileged.
///
/// # Errors
///
/// Returns `PrivilegeError::NotRoot` naming `command`.
pub fn require_privileged(check: &impl PrivilegeCheck, command: &str) -> Result<(), PrivilegeError> {
    if check.is_privileged() {
        Ok(())
    } else {
        Err(PrivilegeError::NotRoot {
            command: command.to_string(),
        })
    }
}
