use crate::dialog::{DialogConfig, DialogKind, RationaleConfig, SettingsPromptConfig};
use serde::{Deserialize, Serialize};

/// Everything the host configured for one permission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub rationale: RationaleConfig,
    /// `None` when the host did not configure a settings prompt.
    pub settings_prompt: Option<SettingsPromptConfig>,
}

impl Default for PermissionRequest {
    fn default() -> Self {
        Self {
            rationale: DialogConfig::defaults(DialogKind::Rationale),
            settings_prompt: None,
        }
    }
}

impl PermissionRequest {
    /// Build a request from the two optional JSON arguments of the bridge call.
    ///
    /// A missing rationale argument still yields the default rationale
    /// dialog; a missing settings argument means no settings prompt.
    pub fn from_json_args(rationale: Option<&str>, settings_prompt: Option<&str>) -> Self {
        Self {
            rationale: DialogConfig::from_json(DialogKind::Rationale, rationale),
            settings_prompt: settings_prompt
                .map(|json| DialogConfig::from_json(DialogKind::SettingsPrompt, Some(json))),
        }
    }

    /// The settings prompt, if configured and enabled.
    pub fn settings_prompt_to_show(&self) -> Option<&SettingsPromptConfig> {
        self.settings_prompt.as_ref().filter(|config| config.show)
    }

    /// The rationale dialog, if enabled.
    pub fn rationale_to_show(&self) -> Option<&RationaleConfig> {
        Some(&self.rationale).filter(|config| config.show)
    }
}
