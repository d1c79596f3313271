//! Seams to the native layer.
//!
//! The OS permission subsystem and the dialog UI live in the host runtime.
//! The flow only talks to them through these two traits; every call may fail.

use crate::dialog::DialogConfig;

/// Manifest name of the only permission this crate handles.
pub const POST_NOTIFICATIONS: &str = "android.permission.POST_NOTIFICATIONS";

/// A failure reported by the native layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    #[error("Native call {call} failed: {reason}")]
    CallFailed { call: &'static str, reason: String },
}

impl NativeError {
    pub fn call_failed(call: &'static str, reason: impl Into<String>) -> Self {
        NativeError::CallFailed {
            call,
            reason: reason.into(),
        }
    }
}

/// OS permission state and the system permission prompt.
pub trait PermissionGateway {
    /// Whether the running OS has the runtime notification permission at all.
    fn api_level_supports_permission(&self) -> Result<bool, NativeError>;

    fn check_granted(&self) -> Result<bool, NativeError>;

    /// Whether the OS will no longer show its own prompt for this permission.
    ///
    /// Android has no direct query for this; see [`derive_permanent_denial`].
    ///
    /// [`derive_permanent_denial`]: crate::history::derive_permanent_denial
    fn is_permanently_denied(&self) -> Result<bool, NativeError>;

    /// Android's `shouldShowRequestPermissionRationale`.
    fn should_show_rationale(&self) -> Result<bool, NativeError>;

    /// Show the system prompt and block until the user answers.
    ///
    /// Returns whether the permission was granted.
    fn request_system_permission(&self) -> Result<bool, NativeError>;

    /// Open the app's notification settings and block until the user returns.
    fn open_settings(&self) -> Result<(), NativeError>;
}

/// App-rendered dialogs. Each call blocks until a button is tapped.
pub trait DialogPresenter {
    /// Returns `true` when the user accepted the rationale.
    fn show_rationale(&self, config: &DialogConfig) -> Result<bool, NativeError>;

    /// Returns `true` when the user chose to go to settings.
    fn show_settings_prompt(&self, config: &DialogConfig) -> Result<bool, NativeError>;
}

impl<T: PermissionGateway + ?Sized> PermissionGateway for &T {
    fn api_level_supports_permission(&self) -> Result<bool, NativeError> {
        (**self).api_level_supports_permission()
    }

    fn check_granted(&self) -> Result<bool, NativeError> {
        (**self).check_granted()
    }

    fn is_permanently_denied(&self) -> Result<bool, NativeError> {
        (**self).is_permanently_denied()
    }

    fn should_show_rationale(&self) -> Result<bool, NativeError> {
        (**self).should_show_rationale()
    }

    fn request_system_permission(&self) -> Result<bool, NativeError> {
        (**self).request_system_permission()
    }

    fn open_settings(&self) -> Result<(), NativeError> {
        (**self).open_settings()
    }
}

impl<T: DialogPresenter + ?Sized> DialogPresenter for &T {
    fn show_rationale(&self, config: &DialogConfig) -> Result<bool, NativeError> {
        (**self).show_rationale(config)
    }

    fn show_settings_prompt(&self, config: &DialogConfig) -> Result<bool, NativeError> {
        (**self).show_settings_prompt(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NativeError::call_failed("check_granted", "activity destroyed");
        assert_eq!(
            err.to_string(),
            "Native call check_granted failed: activity destroyed"
        );
    }
}
