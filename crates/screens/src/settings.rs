use serde::Serialize;

use crate::error::{ScreenError, ScreenResult};

/// Placeholder key shown on the API configuration page.
pub const SAMPLE_API_KEY: &str = "sk-proj-xxxxxxxxxxxxxxxxxxxx";

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
    #[default]
    Api,
    Users,
    Notifications,
    Data,
    Audit,
}

impl SettingsSection {
    pub const ALL: [Self; 5] = [
        Self::Api,
        Self::Users,
        Self::Notifications,
        Self::Data,
        Self::Audit,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Users => "users",
            Self::Notifications => "notifications",
            Self::Data => "data",
            Self::Audit => "audit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Api => "API Configuration",
            Self::Users => "User Management",
            Self::Notifications => "Notifications",
            Self::Data => "Data Retention",
            Self::Audit => "Audit Log",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|s| s.id().eq_ignore_ascii_case(raw))
    }
}

pub struct Settings {
    active: SettingsSection,
    api_key: String,
    show_api_key: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::with_api_key(SAMPLE_API_KEY)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            active: SettingsSection::default(),
            api_key: api_key.into(),
            show_api_key: false,
        }
    }

    pub fn active_section(&self) -> SettingsSection {
        self.active
    }

    pub fn select_section(&mut self, id: &str) -> ScreenResult<SettingsSection> {
        let section = SettingsSection::parse(id)
            .ok_or_else(|| ScreenError::not_found("settings section", id))?;
        self.active = section;
        Ok(section)
    }

    /// Returns the new visibility.
    pub fn toggle_api_key_visibility(&mut self) -> bool {
        self.show_api_key = !self.show_api_key;
        self.show_api_key
    }

    pub fn is_api_key_visible(&self) -> bool {
        self.show_api_key
    }

    /// The key as it should be rendered: plain when revealed, otherwise
    /// one mask character per key character.
    pub fn api_key_display(&self) -> String {
        if self.show_api_key {
            self.api_key.clone()
        } else {
            MASK_CHAR.to_string().repeat(self.api_key.chars().count())
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
