//! Markdown file import: the whole file becomes one notes section, titled
//! after the first top-level heading (or the file name without extension).

use regex::Regex;

use crate::model::{SectionType, WriteUpSection};

pub fn section_from_markdown(file_name: &str, content: &str) -> WriteUpSection {
    let h1 = Regex::new(r"(?m)^#\s+(.+)$").unwrap();
    let title = h1
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            let stem = file_name.trim_end_matches(".md").trim_end_matches(".MD");
            if stem.is_empty() {
                "Imported Markdown".to_string()
            } else {
                stem.to_string()
            }
        });

    let mut section = WriteUpSection::new(SectionType::Notes, title);
    section.content = content.to_string();
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_heading_becomes_the_title() {
        let section = section_from_markdown(
            "notes.md",
            "intro text\n\n# HTB Cap Walkthrough\n\n## Recon\n",
        );
        assert_eq!(section.title, "HTB Cap Walkthrough");
        assert_eq!(section.section_type, SectionType::Notes);
        assert!(section.content.contains("## Recon"));
        assert!(!section.is_template);
    }

    #[test]
    fn file_name_is_the_fallback_title() {
        let section = section_from_markdown("cap_notes.md", "no headings here");
        assert_eq!(section.title, "cap_notes");
        let section = section_from_markdown("", "## only h2\n");
        assert_eq!(section.title, "Imported Markdown");
    }
}
