//! Top-level navigation: which screen is active and the mobile menu.

use serde::Serialize;

use crate::error::{ScreenError, ScreenResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Dashboard,
    PolicyNavigator,
    TransactionSentinel,
    AutoReporter,
    Settings,
}

impl Screen {
    /// Every screen, in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::PolicyNavigator,
        Self::TransactionSentinel,
        Self::AutoReporter,
        Self::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::PolicyNavigator => "/policies",
            Self::TransactionSentinel => "/transactions",
            Self::AutoReporter => "/findings",
            Self::Settings => "/settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::PolicyNavigator => "Policy Navigator",
            Self::TransactionSentinel => "Transaction Sentinel",
            Self::AutoReporter => "Auto-Reporter",
            Self::Settings => "Settings",
        }
    }

    /// Resolve a path. A trailing slash is ignored except on `/` itself.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|s| s.path() == path)
    }
}

#[derive(Debug, Default)]
pub struct Shell {
    active: Screen,
    mobile_menu_open: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Switch to the screen at `path` and close the mobile menu. An
    /// unknown path leaves the active screen unchanged.
    pub fn navigate(&mut self, path: &str) -> ScreenResult<Screen> {
        let screen = Screen::from_path(path).ok_or_else(|| ScreenError::not_found("route", path))?;
        if screen != self.active {
            tracing::debug!(from = self.active.path(), to = screen.path(), "Navigating");
        }
        self.active = screen;
        self.mobile_menu_open = false;
        Ok(screen)
    }

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }
}
