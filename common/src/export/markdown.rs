//! Markdown export with a fixed layout: title, bolded metadata block,
//! optional machine-image reference, then each committed section with its
//! type-specific callout, body and screenshot references.

use crate::export::{ExportError, validate};
use crate::model::{SectionType, WriteUp};

pub fn render(write_up: &WriteUp) -> Result<String, ExportError> {
    let sections = validate(write_up)?;

    let mut md = format!("# {}\n\n", write_up.title);
    md.push_str(&format!("**Author:** {}\n", write_up.author));
    md.push_str(&format!("**Date:** {}\n", write_up.date));
    md.push_str(&format!("**Difficulty:** {}\n", write_up.difficulty.label()));
    md.push_str(&format!("**OS:** {}\n", write_up.os.label()));
    if !write_up.tags.is_empty() {
        md.push_str(&format!("**Tags:** {}\n", write_up.tags.join(", ")));
    }
    md.push_str("\n---\n\n");

    if let Some(image) = &write_up.machine_image {
        md.push_str("## Machine Image\n\n");
        md.push_str(&format!("(Reference to image: {})\n\n", image.name));
    }

    for (index, section) in sections.iter().enumerate() {
        md.push_str(&format!("## {}. {}\n\n", index + 1, section.title));
        if section.section_type == SectionType::Question {
            if let Some(answer) = section.answer.as_deref().filter(|a| !a.trim().is_empty()) {
                md.push_str(&format!("> **Answer:** {answer}\n\n"));
            }
        }
        if section.section_type == SectionType::Flag {
            if let Some(flag) = section.flag_value.as_deref().filter(|f| !f.trim().is_empty()) {
                md.push_str(&format!("> **Flag:** `{flag}`\n\n"));
            }
        }
        md.push_str(section.content.trim_end());
        md.push_str("\n\n");

        if !section.screenshots.is_empty() {
            md.push_str("### Screenshots:\n");
            for screenshot in &section.screenshots {
                md.push_str(&format!("- {}\n", screenshot.name));
            }
            md.push('\n');
        }
        md.push_str("---\n\n");
    }

    Ok(md)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{Screenshot, WriteUpSection};

    fn doc() -> WriteUp {
        let mut wu = catalog::default_write_up("2025-06-01");
        wu.title = "HTB Cap".into();
        wu.author = "0xdf".into();
        wu.tags = vec!["linux".into(), "idor".into()];
        let mut flag = WriteUpSection::new(SectionType::Flag, "User Flag");
        flag.content = "Found in /home/nathan/user.txt".into();
        flag.flag_value = Some("ab54...".into());
        flag.screenshots.push(Screenshot::new("proof.png", "data:image/png;base64,AA"));
        let mut question = WriteUpSection::new(SectionType::Question, "Main Vulnerability");
        question.content = "IDOR in the snapshot endpoint".into();
        question.answer = Some("IDOR".into());
        wu.sections.push(flag);
        wu.sections.push(question);
        wu
    }

    #[test]
    fn layout_is_title_metadata_rule_then_sections() {
        let md = render(&doc()).unwrap();
        let title_pos = md.find("# HTB Cap").unwrap();
        let author_pos = md.find("**Author:** 0xdf").unwrap();
        let tags_pos = md.find("**Tags:** linux, idor").unwrap();
        let rule_pos = md.find("\n---\n").unwrap();
        let first_section_pos = md.find("## 1. User Flag").unwrap();
        let second_section_pos = md.find("## 2. Main Vulnerability").unwrap();
        assert!(title_pos < author_pos);
        assert!(author_pos < tags_pos);
        assert!(tags_pos < rule_pos);
        assert!(rule_pos < first_section_pos);
        assert!(first_section_pos < second_section_pos);
    }

    #[test]
    fn type_specific_callouts_and_screenshots() {
        let md = render(&doc()).unwrap();
        assert!(md.contains("> **Flag:** `ab54...`"));
        assert!(md.contains("> **Answer:** IDOR"));
        assert!(md.contains("### Screenshots:\n- proof.png"));
    }

    #[test]
    fn machine_image_is_referenced_by_name() {
        let mut wu = doc();
        wu.machine_image = Some(Screenshot::new("cap.png", "data:image/png;base64,AA"));
        let md = render(&wu).unwrap();
        assert!(md.contains("## Machine Image\n\n(Reference to image: cap.png)"));
    }

    #[test]
    fn refuses_incomplete_documents_and_writes_nothing() {
        let mut wu = doc();
        wu.author.clear();
        assert_eq!(render(&wu), Err(ExportError::MissingAuthor));
    }

    #[test]
    fn template_sections_are_excluded() {
        let md = render(&doc()).unwrap();
        // The starter catalog's template sections never reach the export.
        assert!(!md.contains("Initial Reconnaissance"));
    }
}
