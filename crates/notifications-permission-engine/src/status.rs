//! The fixed set of status values reported back to the host application.
//!
//! The set is versioned by [`STATUS_SET_VERSION`]. Adding, removing or
//! renaming a value is a breaking change for hosts and must bump the version.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version of the status value set below.
pub const STATUS_SET_VERSION: u32 = 1;

/// Outcome of one permission request, delivered exactly once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// The host is not running on Android.
    NotAndroid,
    /// The OS predates the runtime notification permission (below API 33).
    NotNeeded,
    /// Permission was granted before this call.
    AlreadyGranted,
    /// The user accepted the rationale dialog and then granted the permission.
    NewlyGrantedAfterRationale,
    /// The system prompt was shown without a rationale and the user granted.
    NewlyGrantedWithoutRationale,
    /// The user went to settings from the settings prompt and enabled it there.
    GrantedNewlyAfterSettings,
    /// Permanently denied before this call and no settings prompt was shown.
    DeniedPermanentlyAlready,
    /// Permanently denied before this call and the settings prompt did not change that.
    DeniedPermanentlyAlreadyAfterSettings,
    /// The system prompt was answered with a denial that is now permanent.
    DeniedPermanentlyNewly,
    /// Denied again, not permanently, after an earlier denial.
    DeniedNotPermanentlyAlready,
    /// Denied for the first time, not permanently.
    DeniedNotPermanentlyNewly,
    /// The user declined the rationale dialog; the system prompt was never shown.
    DeniedThroughRationaleDialog,
    /// A native call failed. Details are in the log.
    Error,
}

impl PermissionStatus {
    /// Every status value, in declaration order.
    pub const ALL: [PermissionStatus; 13] = [
        PermissionStatus::NotAndroid,
        PermissionStatus::NotNeeded,
        PermissionStatus::AlreadyGranted,
        PermissionStatus::NewlyGrantedAfterRationale,
        PermissionStatus::NewlyGrantedWithoutRationale,
        PermissionStatus::GrantedNewlyAfterSettings,
        PermissionStatus::DeniedPermanentlyAlready,
        PermissionStatus::DeniedPermanentlyAlreadyAfterSettings,
        PermissionStatus::DeniedPermanentlyNewly,
        PermissionStatus::DeniedNotPermanentlyAlready,
        PermissionStatus::DeniedNotPermanentlyNewly,
        PermissionStatus::DeniedThroughRationaleDialog,
        PermissionStatus::Error,
    ];

    /// The wire string sent to the host.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionStatus::NotAndroid => "not_android",
            PermissionStatus::NotNeeded => "not_needed",
            PermissionStatus::AlreadyGranted => "already_granted",
            PermissionStatus::NewlyGrantedAfterRationale => "newly_granted_after_rationale",
            PermissionStatus::NewlyGrantedWithoutRationale => "newly_granted_without_rationale",
            PermissionStatus::GrantedNewlyAfterSettings => "granted_newly_after_settings",
            PermissionStatus::DeniedPermanentlyAlready => "denied_permanently_already",
            PermissionStatus::DeniedPermanentlyAlreadyAfterSettings => {
                "denied_permanently_already_after_settings"
            }
            PermissionStatus::DeniedPermanentlyNewly => "denied_permanently_newly",
            PermissionStatus::DeniedNotPermanentlyAlready => "denied_not_permanently_already",
            PermissionStatus::DeniedNotPermanentlyNewly => "denied_not_permanently_newly",
            PermissionStatus::DeniedThroughRationaleDialog => "denied_through_rationale_dialog",
            PermissionStatus::Error => "error",
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown permission status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for PermissionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
