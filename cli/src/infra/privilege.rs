//! Effective-UID implementation of the `PrivilegeCheck` port.

use crate::application::ports::PrivilegeCheck;

pub struct EffectiveUid;

impl PrivilegeCheck for EffectiveUid {
    fn is_privileged(&self) -> bool {
        nix::unistd::Uid::effective().is_root()
    }
}
