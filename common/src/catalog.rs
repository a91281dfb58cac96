//! Starter-content catalog: the template sections a fresh write-up is
//! pre-populated with, and the default section built by "add section".

use crate::model::{Difficulty, OperatingSystem, SectionType, WriteUp, WriteUpSection};

/// Title, type and starter body of every suggested section in a new
/// document. Order here is the order they appear in the editor.
const STARTER_SECTIONS: [(&str, SectionType, &str); 8] = [
    (
        "Initial Reconnaissance",
        SectionType::Step,
        "## Initial Reconnaissance\n\nPort scan and service discovery:\n\n```bash\nnmap -sC -sV -oN scan.txt <target>\n```\n",
    ),
    (
        "Web Enumeration",
        SectionType::Step,
        "## Web Enumeration\n\nDirectory brute force, virtual hosts, technology fingerprinting:\n\n```bash\ngobuster dir -u http://<target> -w wordlist.txt\n```\n",
    ),
    (
        "Exploitation",
        SectionType::Step,
        "## Exploitation\n\nVulnerability identified, exploit used and how initial access was obtained.\n",
    ),
    (
        "Privilege Escalation",
        SectionType::Step,
        "## Privilege Escalation\n\nEnumeration of the foothold (linpeas/winpeas), misconfiguration found, path to root.\n",
    ),
    (
        "User Flag",
        SectionType::Flag,
        "Location of `user.txt` and how it was read.\n",
    ),
    (
        "Root Flag",
        SectionType::Flag,
        "Location of `root.txt` and how it was read.\n",
    ),
    (
        "Main Vulnerability",
        SectionType::Question,
        "What was the main vulnerability of the machine and how could it have been prevented?\n",
    ),
    (
        "Lessons Learned",
        SectionType::Notes,
        "Techniques worth remembering, tools that helped, dead ends to avoid next time.\n",
    ),
];

/// Builds a fresh default document: empty metadata plus the full starter
/// catalog as template sections. The current date is passed in by the
/// caller (the frontend reads it from the browser clock) so this stays
/// host-testable.
pub fn default_write_up(today: &str) -> WriteUp {
    WriteUp {
        id: uuid::Uuid::new_v4().to_string(),
        title: String::new(),
        author: String::new(),
        date: today.to_string(),
        difficulty: Difficulty::Medium,
        os: OperatingSystem::Linux,
        tags: Vec::new(),
        machine_image: None,
        sections: STARTER_SECTIONS
            .iter()
            .map(|(title, section_type, content)| WriteUpSection {
                is_template: true,
                content: (*content).to_string(),
                ..WriteUpSection::new(*section_type, *title)
            })
            .collect(),
    }
}

/// Builds a committed (non-template) section for the "add section" action.
pub fn default_section(section_type: SectionType, title: Option<String>) -> WriteUpSection {
    let title = title.unwrap_or_else(|| section_type.label().to_string());
    let content = format!("## {title}\n\nSection content...\n");
    WriteUpSection {
        content,
        ..WriteUpSection::new(section_type, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_write_up_has_eight_template_sections() {
        let wu = default_write_up("2025-01-01");
        assert_eq!(wu.sections.len(), 8);
        assert!(wu.sections.iter().all(|s| s.is_template));
        assert_eq!(wu.date, "2025-01-01");
        assert!(wu.user_sections().next().is_none());
    }

    #[test]
    fn default_section_is_committed_and_typed() {
        let s = default_section(SectionType::Flag, None);
        assert_eq!(s.section_type, SectionType::Flag);
        assert!(!s.is_template);
        assert_eq!(s.title, "Flag");
        assert!(!s.content.is_empty());
    }

    #[test]
    fn section_ids_are_unique() {
        let wu = default_write_up("2025-01-01");
        for (i, a) in wu.sections.iter().enumerate() {
            for b in wu.sections.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
