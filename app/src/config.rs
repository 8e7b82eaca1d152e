//! Client settings: defaults, then environment overrides.

pub const BACKEND_URL_ENV: &str = "BLOG_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Origin of the backend, without the `/api` suffix.
    pub backend_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
        }
    }
}

impl ClientSettings {
    /// Base URL every API path hangs off.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url.trim_end_matches('/'))
    }
}

pub fn load_settings() -> ClientSettings {
    apply_overrides(ClientSettings::default(), |key| std::env::var(key).ok())
}

fn apply_overrides(mut settings: ClientSettings, lookup: impl Fn(&str) -> Option<String>) -> ClientSettings {
    if let Some(v) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
        settings.backend_url = v.trim().to_string();
    }
    settings
}
