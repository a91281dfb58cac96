//! Export pipeline: Markdown text, themed HTML (for the browser print/PDF
//! path) and pretty-printed JSON backups. Exports only consider committed
//! (non-template) sections and are all-or-nothing: validation failures
//! abort before anything is produced.

use std::fmt;

use crate::model::{WriteUp, WriteUpSection};

pub mod html;
pub mod markdown;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    MissingTitle,
    MissingAuthor,
    MissingDate,
    /// A committed section has an empty title or body; carries the section
    /// title (or its 1-based position when the title itself is empty).
    IncompleteSection(String),
    NothingToExport,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::MissingTitle => write!(f, "the write-up has no title"),
            ExportError::MissingAuthor => write!(f, "the write-up has no author"),
            ExportError::MissingDate => write!(f, "the write-up has no date"),
            ExportError::IncompleteSection(which) => {
                write!(f, "section {which} is missing a title or content")
            }
            ExportError::NothingToExport => write!(f, "there are no committed sections to export"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Checks the document against the export preconditions and returns the
/// sections that will be exported, in document order.
pub fn validate(write_up: &WriteUp) -> Result<Vec<&WriteUpSection>, ExportError> {
    if write_up.title.trim().is_empty() {
        return Err(ExportError::MissingTitle);
    }
    if write_up.author.trim().is_empty() {
        return Err(ExportError::MissingAuthor);
    }
    if write_up.date.trim().is_empty() {
        return Err(ExportError::MissingDate);
    }
    let sections: Vec<&WriteUpSection> = write_up.user_sections().collect();
    if sections.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    for (index, section) in sections.iter().enumerate() {
        if section.title.trim().is_empty() || section.content.trim().is_empty() {
            let which = if section.title.trim().is_empty() {
                format!("#{}", index + 1)
            } else {
                format!("\"{}\"", section.title)
            };
            return Err(ExportError::IncompleteSection(which));
        }
    }
    Ok(sections)
}

/// Whole document as a pretty-printed JSON backup, same shape as the
/// persisted draft. Never fails validation: a backup must always be
/// possible, even of an incomplete document.
pub fn json_backup(write_up: &WriteUp) -> String {
    // WriteUp contains no map keys or non-string data that can fail to
    // serialize; fall back to the compact form just in case.
    serde_json::to_string_pretty(write_up)
        .unwrap_or_else(|_| serde_json::to_string(write_up).unwrap_or_default())
}

/// Lowercase, underscore-separated file stem derived from the title.
pub fn file_slug(title: &str) -> String {
    let slug: String = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if slug.is_empty() { "writeup".to_string() } else { slug }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::SectionType;

    fn exportable() -> WriteUp {
        let mut wu = catalog::default_write_up("2025-06-01");
        wu.title = "HTB Cap".into();
        wu.author = "0xdf".into();
        wu.sections.push(WriteUpSection {
            content: "nmap scan".into(),
            ..WriteUpSection::new(SectionType::Step, "Recon")
        });
        wu
    }

    #[test]
    fn validate_rejects_missing_metadata() {
        let mut wu = exportable();
        wu.title.clear();
        assert_eq!(validate(&wu), Err(ExportError::MissingTitle));
        let mut wu = exportable();
        wu.author = "  ".into();
        assert_eq!(validate(&wu), Err(ExportError::MissingAuthor));
        let mut wu = exportable();
        wu.date.clear();
        assert_eq!(validate(&wu), Err(ExportError::MissingDate));
    }

    #[test]
    fn validate_rejects_incomplete_sections() {
        let mut wu = exportable();
        wu.sections.last_mut().unwrap().content = String::new();
        assert!(matches!(
            validate(&wu),
            Err(ExportError::IncompleteSection(_))
        ));
    }

    #[test]
    fn validate_skips_template_sections() {
        // The 8 starter templates have no user content yet must not block
        // the export of the one committed section.
        let wu = exportable();
        let sections = validate(&wu).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Recon");
    }

    #[test]
    fn backup_round_trips() {
        let wu = exportable();
        let json = json_backup(&wu);
        let back: WriteUp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wu);
    }

    #[test]
    fn slug_normalizes_titles() {
        assert_eq!(file_slug("HTB Cap  walkthrough"), "htb_cap__walkthrough");
        assert_eq!(file_slug(""), "writeup");
        assert_eq!(file_slug("¿sos? / sí"), "sos__sí");
    }
}
