//! UniFFI bindings for the notifications-permission Android plugin
//!
//! The Kotlin side implements [`NativeHost`] on top of the Activity
//! (permission checks, the system prompt, dialogs, the settings screen) and
//! calls [`NotificationsPermission::maybe_ask_permission`]. The status comes
//! back once through [`ResultCallback`].

mod bridge;

use bridge::HostBridge;
use notifications_permission_engine::{
    DialogConfig, FileHistory, MemoryHistory, PermissionFlow, PermissionRequest, PermissionStatus,
    Platform, PromptHistory, STATUS_SET_VERSION,
};
use std::sync::Arc;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors the host can report from its callbacks
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HostError {
    #[error("Host call failed: {reason}")]
    Failed { reason: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for HostError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        HostError::Failed { reason: e.reason }
    }
}

// ============ Host Callbacks ============

/// Native capabilities supplied by the host app.
///
/// Calls arrive on a worker thread. The blocking ones (`request_system_permission`,
/// `open_settings` and the dialogs) must not return until the user has answered.
/// Permanent denial is worked out from `should_show_rationale` and the
/// plugin's history, so the host never has to track it.
#[uniffi::export(with_foreign)]
pub trait NativeHost: Send + Sync {
    /// `Build.VERSION.SDK_INT >= 33`
    fn api_level_supports_permission(&self) -> Result<bool, HostError>;
    fn check_granted(&self) -> Result<bool, HostError>;
    /// `ActivityCompat.shouldShowRequestPermissionRationale`
    fn should_show_rationale(&self) -> Result<bool, HostError>;
    fn request_system_permission(&self) -> Result<bool, HostError>;
    fn open_settings(&self) -> Result<(), HostError>;
    fn show_rationale(&self, dialog: DialogDto) -> Result<bool, HostError>;
    fn show_settings_prompt(&self, dialog: DialogDto) -> Result<bool, HostError>;
}

/// Receives the status string of one request.
///
/// On Android `on_result` is called from the plugin's worker thread. The host
/// must post the result to its main thread before touching UI or web views.
#[uniffi::export(with_foreign)]
pub trait ResultCallback: Send + Sync {
    fn on_result(&self, status: String);
}

// ============ DTOs ============

/// Dialog text, buttons and theme handed to the host for rendering.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct DialogDto {
    pub title: String,
    pub message: String,
    pub ok_label: String,
    pub cancel_label: String,
    /// Android style resource id
    pub theme: i32,
}

impl DialogDto {
    fn from_engine(config: &DialogConfig) -> Self {
        Self {
            title: config.title.clone(),
            message: config.message.clone(),
            ok_label: config.ok_label.clone(),
            cancel_label: config.cancel_label.clone(),
            theme: config.theme.0,
        }
    }
}

// ============ Plugin Handle ============

type SharedHistory = Arc<dyn PromptHistory + Send + Sync>;

/// Entry point of the plugin, one per host activity.
#[derive(uniffi::Object)]
pub struct NotificationsPermission {
    host: Arc<dyn NativeHost>,
    history: SharedHistory,
    platform: Platform,
}

#[uniffi::export]
impl NotificationsPermission {
    /// Create the plugin for the platform this library was built for.
    ///
    /// `history_path` is a file in the app's private storage used to tell
    /// repeated denials from first ones. Without it that memory only lasts
    /// as long as the process.
    #[uniffi::constructor]
    pub fn new(host: Arc<dyn NativeHost>, history_path: Option<String>) -> Self {
        Self::with_platform(host, history_path, Platform::current())
    }

    /// Create the plugin for a host-reported platform id such as `"android"`.
    #[uniffi::constructor]
    pub fn with_platform_id(
        host: Arc<dyn NativeHost>,
        history_path: Option<String>,
        platform_id: String,
    ) -> Self {
        Self::with_platform(host, history_path, Platform::from_id(&platform_id))
    }

    /// Ask for the notification permission if needed.
    ///
    /// `rationale_dialog` and `settings_dialog` are optional JSON objects with
    /// the keys `show`, `title`, `msg`, `okButton`, `cancelButton` and `theme`.
    /// Missing or malformed values fall back to defaults. Off Android the
    /// callback runs before this returns; on Android it runs later, once,
    /// from a worker thread.
    pub fn maybe_ask_permission(
        &self,
        on_result: Arc<dyn ResultCallback>,
        rationale_dialog: Option<String>,
        settings_dialog: Option<String>,
    ) {
        let request = PermissionRequest::from_json_args(
            rationale_dialog.as_deref(),
            settings_dialog.as_deref(),
        );

        if !self.platform.is_android() {
            deliver(
                self.host.clone(),
                &*self.history,
                self.platform,
                &request,
                &*on_result,
            );
            return;
        }

        let host = self.host.clone();
        let history = self.history.clone();
        let platform = self.platform;
        let callback = on_result.clone();
        let spawned = std::thread::Builder::new()
            .name("notifications-permission".to_string())
            .spawn(move || deliver(host, &*history, platform, &request, &*callback));

        if let Err(e) = spawned {
            log::error!("Failed to start permission request thread: {e}");
            on_result.on_result(PermissionStatus::Error.to_string());
        }
    }
}

impl NotificationsPermission {
    fn with_platform(
        host: Arc<dyn NativeHost>,
        history_path: Option<String>,
        platform: Platform,
    ) -> Self {
        Self {
            host,
            history: open_history(history_path),
            platform,
        }
    }
}

fn open_history(history_path: Option<String>) -> SharedHistory {
    let Some(path) = history_path else {
        return Arc::new(MemoryHistory::new());
    };

    match FileHistory::open(&path) {
        Ok(history) => Arc::new(history),
        Err(e) => {
            log::warn!("Falling back to in-memory permission history: {e}");
            Arc::new(MemoryHistory::new())
        }
    }
}

fn deliver(
    host: Arc<dyn NativeHost>,
    history: &(dyn PromptHistory + Send + Sync),
    platform: Platform,
    request: &PermissionRequest,
    on_result: &dyn ResultCallback,
) {
    let bridge = HostBridge::new(host, history);
    PermissionFlow::new(&bridge, &bridge, history).maybe_ask_permission(
        platform,
        request,
        |status| on_result.on_result(status.to_string()),
    );
}

// ============ Standalone Functions ============

/// Every status string the plugin can report.
#[uniffi::export]
pub fn status_values() -> Vec<String> {
    PermissionStatus::ALL
        .iter()
        .map(|status| status.to_string())
        .collect()
}

/// Version of the status set returned by [`status_values`].
#[uniffi::export]
pub fn status_set_version() -> u32 {
    STATUS_SET_VERSION
}

/// Route `log` output to logcat. Safe to call more than once.
#[uniffi::export]
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("NotificationsPermission"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::mpsc::{Sender, channel};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Host with fixed answers that records the dialogs it was asked to show.
    #[derive(Default)]
    struct FakeHost {
        supported: bool,
        granted: bool,
        should_show_rationale: bool,
        grants: bool,
        accepts_dialogs: bool,
        broken: bool,
        dialogs: Mutex<Vec<DialogDto>>,
    }

    impl FakeHost {
        fn answer(&self, value: bool) -> Result<bool, HostError> {
            if self.broken {
                return Err(HostError::Failed {
                    reason: "activity gone".to_string(),
                });
            }
            Ok(value)
        }
    }

    impl NativeHost for FakeHost {
        fn api_level_supports_permission(&self) -> Result<bool, HostError> {
            self.answer(self.supported)
        }
        fn check_granted(&self) -> Result<bool, HostError> {
            self.answer(self.granted)
        }
        fn should_show_rationale(&self) -> Result<bool, HostError> {
            self.answer(self.should_show_rationale)
        }
        fn request_system_permission(&self) -> Result<bool, HostError> {
            self.answer(self.grants)
        }
        fn open_settings(&self) -> Result<(), HostError> {
            self.answer(true).map(|_| ())
        }
        fn show_rationale(&self, dialog: DialogDto) -> Result<bool, HostError> {
            self.dialogs.lock().unwrap().push(dialog);
            self.answer(self.accepts_dialogs)
        }
        fn show_settings_prompt(&self, dialog: DialogDto) -> Result<bool, HostError> {
            self.dialogs.lock().unwrap().push(dialog);
            self.answer(self.accepts_dialogs)
        }
    }

    struct ChannelCallback(Mutex<Sender<String>>);

    impl ResultCallback for ChannelCallback {
        fn on_result(&self, status: String) {
            self.0.lock().unwrap().send(status).unwrap();
        }
    }

    fn ask(
        host: Arc<FakeHost>,
        platform_id: &str,
        rationale: Option<&str>,
        settings: Option<&str>,
    ) -> Vec<String> {
        let (tx, rx) = channel();
        let plugin = NotificationsPermission::with_platform_id(host, None, platform_id.to_string());
        plugin.maybe_ask_permission(
            Arc::new(ChannelCallback(Mutex::new(tx))),
            rationale.map(str::to_string),
            settings.map(str::to_string),
        );

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let mut received = vec![first];
        received.extend(rx.try_iter());
        received
    }

    #[test]
    fn test_not_android_is_reported_synchronously() {
        let (tx, rx) = channel();
        let plugin = NotificationsPermission::with_platform_id(
            Arc::new(FakeHost::default()),
            None,
            "ios".to_string(),
        );
        plugin.maybe_ask_permission(Arc::new(ChannelCallback(Mutex::new(tx))), None, None);

        assert_eq!(rx.try_recv().unwrap(), "not_android");
    }

    #[test]
    fn test_not_needed_below_api_33() {
        let host = Arc::new(FakeHost::default());
        assert_eq!(ask(host, "android", None, None), vec!["not_needed"]);
    }

    #[test]
    fn test_rationale_accepted_and_granted() {
        let host = Arc::new(FakeHost {
            supported: true,
            should_show_rationale: true,
            grants: true,
            accepts_dialogs: true,
            ..FakeHost::default()
        });

        let statuses = ask(
            host.clone(),
            "android",
            Some(r#"{"msg": "Stay in the loop", "theme": "16974374"}"#),
            None,
        );

        assert_eq!(statuses, vec!["newly_granted_after_rationale"]);
        let dialogs = host.dialogs.lock().unwrap();
        assert_eq!(
            dialogs[0],
            DialogDto {
                title: "Notification Permission".to_string(),
                message: "Stay in the loop".to_string(),
                ok_label: "OK".to_string(),
                cancel_label: "Not now".to_string(),
                theme: 16974374,
            }
        );
    }

    /// A history file where Android already asked for a rationale once.
    fn history_after_rationale(temp_dir: &TempDir) -> String {
        let path = temp_dir.path().join("history.toml");
        std::fs::write(&path, "rationale_needed_before = true\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_settings_prompt_passed_to_host() {
        let temp_dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost {
            supported: true,
            ..FakeHost::default()
        });
        let (tx, rx) = channel();
        let plugin = NotificationsPermission::with_platform_id(
            host.clone(),
            Some(history_after_rationale(&temp_dir)),
            "android".to_string(),
        );

        plugin.maybe_ask_permission(
            Arc::new(ChannelCallback(Mutex::new(tx))),
            None,
            Some(r#"{"cancelButton": "Later"}"#.to_string()),
        );

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            "denied_permanently_already_after_settings"
        );
        let dialogs = host.dialogs.lock().unwrap();
        assert_eq!(dialogs[0].ok_label, "Settings");
        assert_eq!(dialogs[0].cancel_label, "Later");
    }

    #[test]
    fn test_first_launch_is_never_permanently_denied() {
        let host = Arc::new(FakeHost {
            supported: true,
            ..FakeHost::default()
        });

        let statuses = ask(host.clone(), "android", None, Some("{}"));

        assert_eq!(statuses, vec!["denied_not_permanently_newly"]);
        assert!(host.dialogs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_host_failure_reports_error() {
        let host = Arc::new(FakeHost {
            broken: true,
            ..FakeHost::default()
        });
        assert_eq!(ask(host, "android", None, None), vec!["error"]);
    }

    #[test]
    fn test_history_file_tracks_repeated_denial() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history.toml");
        let host = Arc::new(FakeHost {
            supported: true,
            ..FakeHost::default()
        });

        let mut statuses = Vec::new();
        for _ in 0..2 {
            let (tx, rx) = channel();
            let plugin = NotificationsPermission::with_platform_id(
                host.clone(),
                Some(history_path.to_string_lossy().into_owned()),
                "android".to_string(),
            );
            plugin.maybe_ask_permission(Arc::new(ChannelCallback(Mutex::new(tx))), None, None);
            statuses.push(rx.recv_timeout(Duration::from_secs(5)).unwrap());
        }

        assert_eq!(
            statuses,
            vec!["denied_not_permanently_newly", "denied_not_permanently_already"]
        );
    }

    #[test]
    fn test_unreadable_history_falls_back_to_memory() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history.toml");
        std::fs::write(&history_path, "denied_before = [").unwrap();

        let history = open_history(Some(history_path.to_string_lossy().into_owned()));
        assert!(!history.denied_before());
    }

    #[test]
    fn test_status_values() {
        let values = status_values();
        assert_eq!(values.len(), 13);
        assert_eq!(values.first().map(String::as_str), Some("not_android"));
        assert_eq!(values.last().map(String::as_str), Some("error"));
        assert_eq!(status_set_version(), 1);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
