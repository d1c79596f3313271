//! Sequencing of native calls and dialogs for one permission request.

use crate::classify::{Observations, RationaleOutcome, RequestOutcome, SettingsOutcome, classify};
use crate::dialog::DialogConfig;
use crate::gateway::{DialogPresenter, NativeError, PermissionGateway};
use crate::history::PromptHistory;
use crate::platform::Platform;
use crate::request::PermissionRequest;
use crate::status::PermissionStatus;

/// Drives one request through the gateway and presenter, then classifies it.
#[derive(Debug)]
pub struct PermissionFlow<G, P, H> {
    gateway: G,
    presenter: P,
    history: H,
}

impl<G, P, H> PermissionFlow<G, P, H>
where
    G: PermissionGateway,
    P: DialogPresenter,
    H: PromptHistory,
{
    pub fn new(gateway: G, presenter: P, history: H) -> Self {
        Self {
            gateway,
            presenter,
            history,
        }
    }

    /// Run the request to completion and return its status.
    ///
    /// Native failures are logged and reported as [`PermissionStatus::Error`].
    /// On a non-Android platform no native call is made.
    pub fn run(&self, platform: Platform, request: &PermissionRequest) -> PermissionStatus {
        let status = if platform.is_android() {
            match self.observe(request) {
                Ok(obs) => classify(&obs),
                Err(e) => {
                    log::error!("Notification permission request failed: {e}");
                    PermissionStatus::Error
                }
            }
        } else {
            PermissionStatus::NotAndroid
        };

        log::debug!("Notification permission status: {status}");
        status
    }

    fn observe(&self, request: &PermissionRequest) -> Result<Observations, NativeError> {
        let mut obs = Observations {
            api_level_supports_permission: self.gateway.api_level_supports_permission()?,
            ..Observations::default()
        };
        if !obs.api_level_supports_permission {
            return Ok(obs);
        }

        obs.already_granted = self.gateway.check_granted()?;
        if obs.already_granted {
            return Ok(obs);
        }

        obs.permanently_denied = self.gateway.is_permanently_denied()?;
        if obs.permanently_denied {
            if let Some(prompt) = request.settings_prompt_to_show() {
                obs.settings = self.settings_prompt(prompt)?;
            }
            return Ok(obs);
        }

        if let Some(rationale) = request.rationale_to_show()
            && self.should_show_rationale()?
        {
            if self.presenter.show_rationale(rationale)? {
                obs.rationale = RationaleOutcome::Accepted;
            } else {
                obs.rationale = RationaleOutcome::Declined;
                return Ok(obs);
            }
        }

        obs.denied_before = self.history.denied_before();
        obs.request = if self.gateway.request_system_permission()? {
            RequestOutcome::Granted
        } else {
            let permanently = self.gateway.is_permanently_denied()?;
            self.history.record_denial();
            RequestOutcome::Denied { permanently }
        };

        Ok(obs)
    }

    fn should_show_rationale(&self) -> Result<bool, NativeError> {
        let needed = self.gateway.should_show_rationale()?;
        if needed {
            self.history.record_rationale_needed();
        }
        Ok(needed)
    }

    fn settings_prompt(&self, prompt: &DialogConfig) -> Result<SettingsOutcome, NativeError> {
        if !self.presenter.show_settings_prompt(prompt)? {
            return Ok(SettingsOutcome::Declined);
        }
        self.gateway.open_settings()?;
        Ok(SettingsOutcome::Accepted {
            granted: self.gateway.check_granted()?,
        })
    }

    /// Run the request and hand the status to `on_result`, exactly once.
    pub fn maybe_ask_permission<F>(
        &self,
        platform: Platform,
        request: &PermissionRequest,
        on_result: F,
    ) where
        F: FnOnce(PermissionStatus),
    {
        on_result(self.run(platform, request));
    }
}
