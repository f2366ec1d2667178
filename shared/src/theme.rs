use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Class applied to `<body>` while the dark theme is active.
    pub const DARK_CLASS: &'static str = "dark-mode";

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some(Self::DARK_CLASS),
        }
    }

    /// Icon on the toggle button: shows the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "\u{1F319}",
            Self::Dark => "\u{2600}\u{FE0F}",
        }
    }

    pub fn toggle_title(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode (T)",
            Self::Dark => "Switch to light mode (T)",
        }
    }
}
