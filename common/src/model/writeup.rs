use serde::{Deserialize, Serialize};

use crate::model::screenshot::Screenshot;
use crate::model::section::WriteUpSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
    Custom,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Insane,
        Difficulty::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
            Difficulty::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingSystem {
    Linux,
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Other,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 6] = [
        OperatingSystem::Linux,
        OperatingSystem::Windows,
        OperatingSystem::MacOs,
        OperatingSystem::Android,
        OperatingSystem::Ios,
        OperatingSystem::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Windows => "Windows",
            OperatingSystem::MacOs => "macOS",
            OperatingSystem::Android => "Android",
            OperatingSystem::Ios => "iOS",
            OperatingSystem::Other => "Other",
        }
    }
}

/// Which main pane is shown: the section editor or the rendered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    Editor,
    Preview,
}

/// The report being built. Serialized whole to localStorage and to JSON
/// backups; the field names below are the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteUp {
    pub id: String,
    pub title: String,
    pub author: String,
    /// ISO-8601 date string (`YYYY-MM-DD`).
    pub date: String,
    pub difficulty: Difficulty,
    pub os: OperatingSystem,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_image: Option<Screenshot>,
    #[serde(default)]
    pub sections: Vec<WriteUpSection>,
}

impl WriteUp {
    /// Sections the user has committed to, in document order. Template
    /// sections are suggestions and never leave the editor.
    pub fn user_sections(&self) -> impl Iterator<Item = &WriteUpSection> {
        self.sections.iter().filter(|s| !s.is_template)
    }

    pub fn section(&self, id: &str) -> Option<&WriteUpSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}
