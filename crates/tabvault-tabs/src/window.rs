//! Window state and layout descriptors

use serde::{Deserialize, Serialize};

use crate::group::GroupRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

impl WindowState {
    /// State a restored window is opened in: only an explicit maximize is
    /// carried over, everything else comes back as a normal window
    pub fn for_restore(&self) -> WindowState {
        match self {
            WindowState::Maximized => WindowState::Maximized,
            _ => WindowState::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::Normal => "normal",
            WindowState::Minimized => "minimized",
            WindowState::Maximized => "maximized",
            WindowState::Fullscreen => "fullscreen",
        }
    }
}

impl std::fmt::Display for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WindowState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(WindowState::Normal),
            "minimized" => Ok(WindowState::Minimized),
            "maximized" => Ok(WindowState::Maximized),
            "fullscreen" => Ok(WindowState::Fullscreen),
            _ => Err(format!("Unknown window state: {}", s)),
        }
    }
}

/// Geometry, state and groups of one window in a saved layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub state: WindowState,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

impl WindowLayout {
    pub fn tab_count(&self) -> usize {
        self.groups.iter().map(GroupRecord::tab_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_state() {
        assert_eq!(WindowState::Maximized.for_restore(), WindowState::Maximized);
        assert_eq!(WindowState::Minimized.for_restore(), WindowState::Normal);
        assert_eq!(WindowState::Fullscreen.for_restore(), WindowState::Normal);
        assert_eq!(WindowState::Normal.for_restore(), WindowState::Normal);
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("MAXIMIZED".parse::<WindowState>().unwrap(), WindowState::Maximized);
        assert!("docked".parse::<WindowState>().is_err());
    }

    #[test]
    fn test_layout_defaults_state() {
        let layout: WindowLayout = serde_json::from_str(
            r#"{"left": 0, "top": 0, "width": 800, "height": 600}"#,
        )
        .unwrap();
        assert_eq!(layout.state, WindowState::Normal);
        assert!(layout.groups.is_empty());
        assert_eq!(layout.tab_count(), 0);
    }
}
