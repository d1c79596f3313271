//! Dialog configuration supplied by the host.
//!
//! Both dialogs share one shape. Fields arrive as loosely typed JSON from the
//! bridge; anything missing or of the wrong type falls back to the default
//! for that dialog kind, so parsing never fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which dialog a configuration belongs to. Selects the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Explanation shown before the system prompt.
    Rationale,
    /// Offer to open system settings after a permanent denial.
    SettingsPrompt,
}

/// Android style resource id used to theme a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogTheme(pub i32);

impl DialogTheme {
    /// `android.R.style.Theme_DeviceDefault_Dialog_Alert`
    pub const DEVICE_DEFAULT_DIALOG_ALERT: DialogTheme = DialogTheme(16974545);
}

impl Default for DialogTheme {
    fn default() -> Self {
        DialogTheme::DEVICE_DEFAULT_DIALOG_ALERT
    }
}

const DEFAULT_TITLE: &str = "Notification Permission";
const DEFAULT_RATIONALE_MESSAGE: &str =
    "Permission is needed to show a notification on the lock screen.";
const DEFAULT_SETTINGS_MESSAGE: &str =
    "Notification permission has been set not to ask again! Please provide them from settings.";

/// Text, buttons and theme of one dialog, plus whether to show it at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    pub show: bool,
    pub title: String,
    pub message: String,
    pub ok_label: String,
    pub cancel_label: String,
    pub theme: DialogTheme,
}

/// Configuration of the dialog shown before the system prompt.
pub type RationaleConfig = DialogConfig;

/// Configuration of the dialog shown after a permanent denial.
pub type SettingsPromptConfig = DialogConfig;

impl DialogConfig {
    /// All defaults for the given kind of dialog.
    pub fn defaults(kind: DialogKind) -> Self {
        let (message, ok_label, cancel_label) = match kind {
            DialogKind::Rationale => (DEFAULT_RATIONALE_MESSAGE, "OK", "Not now"),
            DialogKind::SettingsPrompt => (DEFAULT_SETTINGS_MESSAGE, "Settings", "Cancel"),
        };

        Self {
            show: true,
            title: DEFAULT_TITLE.to_string(),
            message: message.to_string(),
            ok_label: ok_label.to_string(),
            cancel_label: cancel_label.to_string(),
            theme: DialogTheme::default(),
        }
    }

    /// Build a configuration from a bridge value, filling defaults.
    ///
    /// A value that is not a JSON object is treated as an empty object.
    pub fn from_value(kind: DialogKind, value: &Value) -> Self {
        let defaults = Self::defaults(kind);
        let Some(obj) = value.as_object() else {
            return defaults;
        };

        Self {
            show: bool_field(obj, "show", defaults.show),
            title: string_field(obj, "title", defaults.title),
            message: string_field(obj, "msg", defaults.message),
            ok_label: string_field(obj, "okButton", defaults.ok_label),
            cancel_label: string_field(obj, "cancelButton", defaults.cancel_label),
            theme: theme_field(obj, "theme", defaults.theme),
        }
    }

    /// Build a configuration from an optional JSON document.
    ///
    /// Malformed JSON is logged and treated like an absent argument.
    pub fn from_json(kind: DialogKind, json: Option<&str>) -> Self {
        match json.map(serde_json::from_str::<Value>) {
            Some(Ok(value)) => Self::from_value(kind, &value),
            Some(Err(e)) => {
                log::warn!("Ignoring malformed {kind:?} dialog configuration: {e}");
                Self::defaults(kind)
            }
            None => Self::defaults(kind),
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str, default: String) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default,
    }
}

/// `true` and `"true"` enable, absent keeps the default, anything else disables.
fn bool_field(obj: &Map<String, Value>, key: &str, default: bool) -> bool {
    match obj.get(key) {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(_) => false,
    }
}

/// Whole numbers and integer strings are accepted; zero counts as unset.
fn theme_field(obj: &Map<String, Value>, key: &str, default: DialogTheme) -> DialogTheme {
    let parsed = match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    match parsed {
        Some(id) if id != 0 => DialogTheme(id),
        _ => default,
    }
}
