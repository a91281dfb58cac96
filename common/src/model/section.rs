use serde::{Deserialize, Serialize};

use crate::model::screenshot::Screenshot;

/// Kind of report entry. Determines which optional fields are relevant
/// (`answer` for questions, `flag_value` for flags) and which starter
/// content a new section gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Step,
    Question,
    Flag,
    Notes,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::Step,
        SectionType::Question,
        SectionType::Flag,
        SectionType::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Step => "Step",
            SectionType::Question => "Question",
            SectionType::Flag => "Flag",
            SectionType::Notes => "Notes",
        }
    }
}

/// One entry of the write-up.
///
/// A section with `is_template = true` is a suggested starter entry the
/// user has not committed to yet: it is excluded from exports and from the
/// structure list of "real" sections. Editing any field of a template
/// section clears the flag (the section becomes user-owned). That rule is
/// enforced centrally by the store reducer, never by individual forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteUpSection {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: String,
    /// Markdown body of the section.
    pub content: String,
    /// Only meaningful when `section_type == Question`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Only meaningful when `section_type == Flag`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_value: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub is_template: bool,
}

impl WriteUpSection {
    pub fn new(section_type: SectionType, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            section_type,
            title: title.into(),
            content: String::new(),
            answer: None,
            flag_value: None,
            screenshots: Vec::new(),
            is_template: false,
        }
    }

    /// Normalizes a section on its way into the document: a missing id is
    /// replaced by a fresh one so the unique-id invariant holds even for
    /// hand-edited imports. Applied by the reducer on every section write.
    pub fn sanitized(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = uuid::Uuid::new_v4().to_string();
        }
        self
    }
}
