//! Adapts the foreign host callbacks to the engine's gateway and presenter.

use crate::{DialogDto, HostError, NativeHost};
use notifications_permission_engine::{
    DialogConfig, DialogPresenter, NativeError, PermissionGateway, PromptHistory,
    derive_permanent_denial,
};
use std::sync::Arc;

pub(crate) struct HostBridge<'a> {
    host: Arc<dyn NativeHost>,
    history: &'a dyn PromptHistory,
}

impl<'a> HostBridge<'a> {
    pub(crate) fn new(host: Arc<dyn NativeHost>, history: &'a dyn PromptHistory) -> Self {
        Self { host, history }
    }
}

fn native(call: &'static str) -> impl FnOnce(HostError) -> NativeError {
    move |e| NativeError::call_failed(call, e.to_string())
}

impl PermissionGateway for HostBridge<'_> {
    fn api_level_supports_permission(&self) -> Result<bool, NativeError> {
        self.host
            .api_level_supports_permission()
            .map_err(native("api_level_supports_permission"))
    }

    fn check_granted(&self) -> Result<bool, NativeError> {
        self.host.check_granted().map_err(native("check_granted"))
    }

    /// Android only exposes the rationale flag, so the answer comes from it
    /// and the history.
    fn is_permanently_denied(&self) -> Result<bool, NativeError> {
        let should_show_rationale = self
            .host
            .should_show_rationale()
            .map_err(native("is_permanently_denied"))?;
        Ok(derive_permanent_denial(should_show_rationale, self.history))
    }

    fn should_show_rationale(&self) -> Result<bool, NativeError> {
        self.host
            .should_show_rationale()
            .map_err(native("should_show_rationale"))
    }

    fn request_system_permission(&self) -> Result<bool, NativeError> {
        self.host
            .request_system_permission()
            .map_err(native("request_system_permission"))
    }

    fn open_settings(&self) -> Result<(), NativeError> {
        self.host.open_settings().map_err(native("open_settings"))
    }
}

impl DialogPresenter for HostBridge<'_> {
    fn show_rationale(&self, config: &DialogConfig) -> Result<bool, NativeError> {
        self.host
            .show_rationale(DialogDto::from_engine(config))
            .map_err(native("show_rationale"))
    }

    fn show_settings_prompt(&self, config: &DialogConfig) -> Result<bool, NativeError> {
        self.host
            .show_settings_prompt(DialogDto::from_engine(config))
            .map_err(native("show_settings_prompt"))
    }
}
