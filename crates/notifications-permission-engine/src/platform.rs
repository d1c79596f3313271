/// Platform the host application runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }

    /// Map a host-reported platform id (e.g. `"android"`, `"ios"`, `"browser"`).
    pub fn from_id(id: &str) -> Self {
        if id.eq_ignore_ascii_case("android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }

    pub fn is_android(self) -> bool {
        self == Platform::Android
    }
}
