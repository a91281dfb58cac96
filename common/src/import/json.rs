//! Lenient JSON import. Payloads come from hand-edited backups or other
//! tools, so nothing is assumed: fields are coerced one by one through a
//! single sanitization function before any value enters the model.

use serde_json::Value;

use crate::catalog;
use crate::import::ImportError;
use crate::model::{
    Difficulty, OperatingSystem, Screenshot, SectionType, WriteUp, WriteUpSection,
};

/// How imported sections are merged into the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Drop the current user-owned sections, keep the template suggestions,
    /// and take the imported sections instead.
    ReplaceUserSections,
    /// Keep everything and append the imported sections at the end.
    Append,
}

fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn opt_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn screenshot_from_value(value: &Value) -> Option<Screenshot> {
    let obj = value.as_object()?;
    let data_url = string_or_empty(obj.get("dataUrl"));
    if data_url.is_empty() {
        return None;
    }
    let mut shot = Screenshot::new(string_or_empty(obj.get("name")), data_url);
    if let Some(id) = opt_string(obj.get("id")).filter(|id| !id.trim().is_empty()) {
        shot.id = id;
    }
    if shot.name.is_empty() {
        shot.name = "screenshot".to_string();
    }
    Some(shot)
}

/// The single sanitization boundary for section-shaped JSON. Non-object
/// entries are rejected; inside an object every field is coerced: titles and
/// contents become empty strings when mistyped, screenshots default to an
/// empty list, unknown section types become notes.
pub fn section_from_value(value: &Value) -> Option<WriteUpSection> {
    let obj = value.as_object()?;
    let section_type = obj
        .get("type")
        .cloned()
        .and_then(|t| serde_json::from_value::<SectionType>(t).ok())
        .unwrap_or(SectionType::Notes);
    let mut section = WriteUpSection::new(section_type, string_or_empty(obj.get("title")));
    if let Some(id) = opt_string(obj.get("id")).filter(|id| !id.trim().is_empty()) {
        section.id = id;
    }
    section.content = string_or_empty(obj.get("content"));
    section.answer = opt_string(obj.get("answer"));
    section.flag_value = opt_string(obj.get("flagValue"));
    section.is_template = obj
        .get("isTemplate")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    section.screenshots = obj
        .get("screenshots")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(screenshot_from_value).collect())
        .unwrap_or_default();
    Some(section)
}

/// Parses a whole document, merging the payload over a default write-up so
/// missing fields get sane values. `today` seeds the default date.
pub fn parse_document(text: &str, today: &str) -> Result<WriteUp, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;
    let obj = value.as_object().ok_or(ImportError::NotAnObject)?;

    let mut write_up = catalog::default_write_up(today);
    if let Some(id) = opt_string(obj.get("id")).filter(|id| !id.trim().is_empty()) {
        write_up.id = id;
    }
    write_up.title = string_or_empty(obj.get("title"));
    write_up.author = string_or_empty(obj.get("author"));
    if let Some(date) = opt_string(obj.get("date")).filter(|d| !d.trim().is_empty()) {
        write_up.date = date;
    }
    if let Some(difficulty) = obj
        .get("difficulty")
        .cloned()
        .and_then(|d| serde_json::from_value::<Difficulty>(d).ok())
    {
        write_up.difficulty = difficulty;
    }
    if let Some(os) = obj
        .get("os")
        .cloned()
        .and_then(|o| serde_json::from_value::<OperatingSystem>(o).ok())
    {
        write_up.os = os;
    }
    write_up.tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    write_up.machine_image = obj.get("machineImage").and_then(screenshot_from_value);
    if let Some(sections) = obj.get("sections").and_then(Value::as_array) {
        write_up.sections = sections.iter().filter_map(section_from_value).collect();
    }
    Ok(write_up)
}

/// Parses a sections-only import: the object must carry a non-empty
/// `sections` array to be actionable.
pub fn parse_sections(text: &str) -> Result<Vec<WriteUpSection>, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;
    let obj = value.as_object().ok_or(ImportError::NotAnObject)?;
    let sections = obj
        .get("sections")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingSections)?;
    let parsed: Vec<WriteUpSection> = sections.iter().filter_map(section_from_value).collect();
    if parsed.is_empty() {
        return Err(ImportError::MissingSections);
    }
    Ok(parsed)
}

/// Applies [`MergeStrategy::ReplaceUserSections`]: template suggestions
/// survive, user sections are swapped for the imported ones (fresh ids,
/// committed). The result is meant for a whole-document load.
pub fn replace_user_sections(current: &WriteUp, imported: Vec<WriteUpSection>) -> WriteUp {
    let mut merged = current.clone();
    merged.sections.retain(|s| s.is_template);
    merged.sections.extend(imported.into_iter().map(|s| {
        let mut s = s.sanitized();
        s.id = uuid::Uuid::new_v4().to_string();
        s.is_template = false;
        s
    }));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_fields_are_coerced_not_fatal() {
        let text = r#"{
            "title": 42,
            "tags": "not-an-array",
            "sections": [
                { "type": "flag", "title": null, "content": 7, "screenshots": "nope" },
                "not-an-object"
            ]
        }"#;
        let wu = parse_document(text, "2025-06-01").unwrap();
        assert_eq!(wu.title, "");
        assert!(wu.tags.is_empty());
        assert_eq!(wu.sections.len(), 1);
        let section = &wu.sections[0];
        assert_eq!(section.section_type, SectionType::Flag);
        assert_eq!(section.title, "");
        assert_eq!(section.content, "");
        assert!(section.screenshots.is_empty());
        assert!(!section.is_template);
    }

    #[test]
    fn unknown_section_type_falls_back_to_notes() {
        let value: Value = serde_json::from_str(
            r#"{ "type": "chapter", "title": "t", "content": "c" }"#,
        )
        .unwrap();
        let section = section_from_value(&value).unwrap();
        assert_eq!(section.section_type, SectionType::Notes);
    }

    #[test]
    fn missing_document_fields_get_defaults() {
        let wu = parse_document("{}", "2025-06-01").unwrap();
        assert_eq!(wu.date, "2025-06-01");
        assert_eq!(wu.difficulty, Difficulty::Medium);
        assert_eq!(wu.os, OperatingSystem::Linux);
        // No sections key: the starter catalog stays in place.
        assert_eq!(wu.sections.len(), 8);
    }

    #[test]
    fn full_backup_round_trips_through_the_boundary() {
        let mut original = catalog::default_write_up("2025-06-01");
        original.title = "HTB Cap".into();
        original.author = "0xdf".into();
        original.sections[0].is_template = false;
        original.sections[0].content = "nmap".into();
        let json = crate::export::json_backup(&original);
        let back = parse_document(&json, "1999-01-01").unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn sections_import_requires_an_actionable_array() {
        assert_eq!(
            parse_sections(r#"{ "title": "x" }"#),
            Err(ImportError::MissingSections)
        );
        assert_eq!(parse_sections("[1,2]"), Err(ImportError::NotAnObject));
        assert!(matches!(
            parse_sections("not json"),
            Err(ImportError::Parse(_))
        ));
        let ok = parse_sections(r#"{ "sections": [ { "title": "a", "content": "b" } ] }"#);
        assert_eq!(ok.unwrap().len(), 1);
    }

    #[test]
    fn replace_strategy_keeps_templates_only() {
        let mut current = catalog::default_write_up("2025-06-01");
        current.sections[0].is_template = false; // user-owned now
        let imported = vec![WriteUpSection::new(SectionType::Step, "Imported")];
        let merged = replace_user_sections(&current, imported);
        assert_eq!(merged.sections.len(), 8); // 7 templates + 1 imported
        assert_eq!(merged.sections.last().unwrap().title, "Imported");
        assert!(merged.sections.iter().take(7).all(|s| s.is_template));
    }
}
