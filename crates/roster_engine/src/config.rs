//! # Engine Configuration
//!
//! Tunables shared by the absence counter and the blacklist policy
//! engine.
//!
//! ## Defaults
//!
//! | Field | Default Value |
//! |-------|---------------|
//! | `absence_threshold` | `3` |
//! | `default_ban_months` | `6` |

use roster_common::DEFAULT_BAN_MONTHS;

/// Default absence count at which a ban becomes eligible to be
/// offered to an administrator.
const DEFAULT_ABSENCE_THRESHOLD: u32 = 3;

/// Configuration for the roster engine components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Absence count at which `suggest_blacklist` starts returning
    /// `true`. Advisory only — bans are never created automatically.
    pub absence_threshold: u32,

    /// Ban duration in months used when `apply_ban` is called
    /// without an explicit duration.
    pub default_ban_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            absence_threshold: DEFAULT_ABSENCE_THRESHOLD,
            default_ban_months: DEFAULT_BAN_MONTHS,
        }
    }
}
