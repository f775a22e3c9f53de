//! UI flags owned by the root view.
//!
//! Theme, drawer and the transient notification live in one serializable
//! value. Every change goes through [`ViewState::reduce`], a pure function of
//! the previous state and a [`ViewAction`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message for the user; replaced by the next one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    SetTheme(Theme),
    ToggleTheme,
    OpenDrawer,
    CloseDrawer,
    ToggleDrawer,
    Notify(Notification),
    DismissNotification,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub theme: Theme,
    pub drawer_open: bool,
    pub notification: Option<Notification>,
}

impl ViewState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn reduce(self, action: ViewAction) -> ViewState {
        match action {
            ViewAction::SetTheme(theme) => ViewState { theme, ..self },
            ViewAction::ToggleTheme => ViewState {
                theme: self.theme.toggled(),
                ..self
            },
            ViewAction::OpenDrawer => ViewState {
                drawer_open: true,
                ..self
            },
            ViewAction::CloseDrawer => ViewState {
                drawer_open: false,
                ..self
            },
            ViewAction::ToggleDrawer => ViewState {
                drawer_open: !self.drawer_open,
                ..self
            },
            ViewAction::Notify(notification) => ViewState {
                notification: Some(notification),
                ..self
            },
            ViewAction::DismissNotification => ViewState {
                notification: None,
                ..self
            },
        }
    }
}
