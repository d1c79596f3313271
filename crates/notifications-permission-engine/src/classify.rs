//! Pure mapping from observed permission state to a status.

use crate::status::PermissionStatus;

/// What happened with the settings prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsOutcome {
    /// Not shown, either unconfigured or not reached.
    #[default]
    NotShown,
    Declined,
    /// The user went to settings; `granted` is the state on return.
    Accepted { granted: bool },
}

/// What happened with the rationale dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RationaleOutcome {
    #[default]
    NotShown,
    Accepted,
    Declined,
}

/// What happened with the system prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The system prompt was never reached.
    #[default]
    NotRequested,
    Granted,
    /// `permanently` is whether the OS reported a permanent denial afterwards.
    Denied { permanently: bool },
}

/// Everything the flow observed before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observations {
    pub platform_is_android: bool,
    pub api_level_supports_permission: bool,
    pub already_granted: bool,
    pub permanently_denied: bool,
    pub settings: SettingsOutcome,
    pub rationale: RationaleOutcome,
    pub request: RequestOutcome,
    /// Whether the history held an earlier denial before this request.
    pub denied_before: bool,
}

impl Default for Observations {
    fn default() -> Self {
        Self {
            platform_is_android: true,
            api_level_supports_permission: true,
            already_granted: false,
            permanently_denied: false,
            settings: SettingsOutcome::NotShown,
            rationale: RationaleOutcome::NotShown,
            request: RequestOutcome::NotRequested,
            denied_before: false,
        }
    }
}

/// Classify observations. The first matching rule wins.
///
/// Observations that stop short of any terminal state (the system prompt was
/// never requested although nothing ended the flow earlier) classify as
/// [`PermissionStatus::Error`].
pub fn classify(obs: &Observations) -> PermissionStatus {
    if !obs.platform_is_android {
        return PermissionStatus::NotAndroid;
    }
    if !obs.api_level_supports_permission {
        return PermissionStatus::NotNeeded;
    }
    if obs.already_granted {
        return PermissionStatus::AlreadyGranted;
    }
    if obs.permanently_denied {
        return match obs.settings {
            SettingsOutcome::NotShown => PermissionStatus::DeniedPermanentlyAlready,
            SettingsOutcome::Accepted { granted: true } => {
                PermissionStatus::GrantedNewlyAfterSettings
            }
            SettingsOutcome::Accepted { granted: false } | SettingsOutcome::Declined => {
                PermissionStatus::DeniedPermanentlyAlreadyAfterSettings
            }
        };
    }
    if obs.rationale == RationaleOutcome::Declined {
        return PermissionStatus::DeniedThroughRationaleDialog;
    }

    let after_rationale = obs.rationale == RationaleOutcome::Accepted;
    match obs.request {
        RequestOutcome::NotRequested => PermissionStatus::Error,
        RequestOutcome::Granted if after_rationale => PermissionStatus::NewlyGrantedAfterRationale,
        RequestOutcome::Granted => PermissionStatus::NewlyGrantedWithoutRationale,
        RequestOutcome::Denied { permanently: true } => PermissionStatus::DeniedPermanentlyNewly,
        RequestOutcome::Denied { permanently: false } if obs.denied_before => {
            PermissionStatus::DeniedNotPermanentlyAlready
        }
        RequestOutcome::Denied { permanently: false } => {
            PermissionStatus::DeniedNotPermanentlyNewly
        }
    }
}
