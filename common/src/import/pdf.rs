//! PDF import: text extraction per page plus embedded JPEG recovery, then
//! regex heuristics that classify the text into typed sections (found
//! flags, shell commands, network indicators, tools, heading-delimited
//! blocks). The heuristics are deliberately coarse: anything they miss
//! still lands in a raw-text notes section.

use base64::Engine as _;
use base64::engine::general_purpose;
use lopdf::{Document, Object};
use regex::Regex;

use crate::import::ImportError;
use crate::model::{Screenshot, SectionType, WriteUpSection};

/// Extracts and classifies a PDF. The returned sections include, when
/// embedded images were found, a final step section carrying them as
/// screenshots.
pub fn extract(file_name: &str, bytes: &[u8]) -> Result<Vec<WriteUpSection>, ImportError> {
    let doc = Document::load_mem(bytes).map_err(|e| ImportError::Pdf(e.to_string()))?;

    let mut text = String::new();
    let mut images = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        if let Ok(page_text) = doc.extract_text(&[page_number]) {
            if !page_text.trim().is_empty() {
                if !text.is_empty() {
                    text.push_str("\n\n");
                }
                text.push_str(page_text.trim());
            }
        }
        images.extend(page_images(&doc, page_id, page_number));
    }

    let mut sections = classify_text(&text);
    if sections.is_empty() && !text.trim().is_empty() {
        let mut fallback = WriteUpSection::new(
            SectionType::Notes,
            format!("PDF Extracted Content - {}", stem(file_name)),
        );
        fallback.content = text.trim().to_string();
        sections.push(fallback);
    }

    if !images.is_empty() {
        let mut image_section = WriteUpSection::new(
            SectionType::Step,
            format!("Extracted Images - {}", stem(file_name)),
        );
        image_section.content = format!("{} image(s) extracted from the PDF.", images.len());
        image_section.screenshots = images;
        sections.push(image_section);
    }

    if sections.is_empty() {
        return Err(ImportError::Pdf(
            "no text or images could be extracted".to_string(),
        ));
    }
    Ok(sections)
}

fn stem(file_name: &str) -> &str {
    let stem = file_name.trim_end_matches(".pdf").trim_end_matches(".PDF");
    if stem.is_empty() { "import" } else { stem }
}

fn resolved<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// JPEG (DCTDecode) XObjects can be reused byte-for-byte as data URLs;
/// other encodings are skipped rather than re-rendered.
fn page_images(doc: &Document, page_id: (u32, u16), page_number: u32) -> Vec<Screenshot> {
    let mut images = Vec::new();
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return images;
    };
    let Ok(resources) = page_dict.get(b"Resources").map(|r| resolved(doc, r)) else {
        return images;
    };
    let Ok(resources) = resources.as_dict() else {
        return images;
    };
    let Ok(xobjects) = resources.get(b"XObject").map(|x| resolved(doc, x)) else {
        return images;
    };
    let Ok(xobjects) = xobjects.as_dict() else {
        return images;
    };

    for (name, object) in xobjects.iter() {
        let Ok(stream) = resolved(doc, object).as_stream() else {
            continue;
        };
        let is_image = stream
            .dict
            .get(b"Subtype")
            .and_then(|s| s.as_name())
            .map(|s| s == b"Image")
            .unwrap_or(false);
        if !is_image || !has_dct_filter(doc, stream) {
            continue;
        }
        let encoded = general_purpose::STANDARD.encode(&stream.content);
        images.push(Screenshot::new(
            format!(
                "pdf_image_p{}_{}.jpg",
                page_number,
                String::from_utf8_lossy(name)
            ),
            format!("data:image/jpeg;base64,{encoded}"),
        ));
    }
    images
}

fn has_dct_filter(doc: &Document, stream: &lopdf::Stream) -> bool {
    let Ok(filter) = stream.dict.get(b"Filter") else {
        return false;
    };
    match resolved(doc, filter) {
        Object::Name(name) => name == b"DCTDecode",
        Object::Array(filters) => filters
            .iter()
            .any(|f| matches!(resolved(doc, f), Object::Name(n) if n == b"DCTDecode")),
        _ => false,
    }
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn find_all(text: &str, patterns: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        for m in re.find_iter(text) {
            found.push(m.as_str().trim().to_string());
        }
    }
    dedupe(found)
}

/// Heuristic classification of extracted text into write-up sections.
pub fn classify_text(text: &str) -> Vec<WriteUpSection> {
    let mut sections = Vec::new();
    if text.trim().is_empty() {
        return sections;
    }

    let flags = find_all(
        text,
        &[
            r"(?i)flag\{[^}]+\}",
            r"(?i)ctf\{[^}]+\}",
            r"(?i)htb\{[^}]+\}",
            r"\b[a-f0-9]{32}\b",
        ],
    );
    if !flags.is_empty() {
        let mut section = WriteUpSection::new(SectionType::Flag, "Found Flags");
        section.content = flags
            .iter()
            .map(|f| format!("`{f}`"))
            .collect::<Vec<_>>()
            .join("\n\n");
        section.flag_value = flags.first().cloned();
        sections.push(section);
    }

    let commands = find_all(
        text,
        &[r"(?m)^\s*(?:[$>]|sudo|nmap|gobuster|sqlmap|nc|netcat|curl|wget|python\d?|ssh|ffuf|hydra)\s+\S.*$"],
    );
    if !commands.is_empty() {
        let mut section = WriteUpSection::new(SectionType::Step, "Commands Used");
        section.content = commands
            .iter()
            .map(|c| format!("```bash\n{c}\n```"))
            .collect::<Vec<_>>()
            .join("\n\n");
        sections.push(section);
    }

    let network = find_all(
        text,
        &[
            r"https?://[^\s)]+",
            r"\b(?:\d{1,3}\.){3}\d{1,3}(?::\d+)?\b",
            r"\b\d{1,5}/(?:tcp|udp)\b",
        ],
    );
    if !network.is_empty() {
        let mut section = WriteUpSection::new(SectionType::Step, "Network Information");
        section.content = network
            .iter()
            .map(|n| format!("- {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(section);
    }

    let tools = dedupe(
        find_all(
            text,
            &[r"(?i)\b(?:nmap|gobuster|dirb|nikto|sqlmap|burpsuite|burp|metasploit|john|hashcat|hydra|netcat|ffuf|wfuzz|linpeas|winpeas|searchsploit|msfvenom|msfconsole|crackmapexec|bloodhound)\b"],
        )
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect(),
    );
    if !tools.is_empty() {
        let mut section = WriteUpSection::new(SectionType::Notes, "Tools Used");
        section.content = tools
            .iter()
            .map(|t| format!("- **{t}**"))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(section);
    }

    sections.extend(sections_by_headings(text));
    sections
}

fn is_heading(line: &str) -> bool {
    let markdown = Regex::new(r"^#{1,6}\s+\S").unwrap();
    let known = Regex::new(
        r"(?i)^(?:reconnaissance|recon|enumeration|exploitation|privilege escalation|post exploitation|lessons learned|conclusion|overview|summary|methodology|tools used|findings|vulnerabilities|step \d+|phase \d+)\b",
    )
    .unwrap();
    let numbered = Regex::new(r"^\d+[.)]\s+\S").unwrap();
    let shouted = Regex::new(r"^[A-Z][A-Z\s]{2,48}$").unwrap();
    markdown.is_match(line) || known.is_match(line) || numbered.is_match(line) || shouted.is_match(line)
}

fn classify_heading(title: &str) -> SectionType {
    let lower = title.to_lowercase();
    let flagish = ["flag", "user.txt", "root.txt", "proof", "evidence"];
    if flagish.iter().any(|k| lower.contains(k)) {
        return SectionType::Flag;
    }
    let steppy = [
        "recon", "enum", "scan", "exploit", "privilege", "escalation", "shell", "payload",
        "foothold", "web", "attack",
    ];
    if steppy.iter().any(|k| lower.contains(k)) {
        return SectionType::Step;
    }
    let questiony = ["?", "question", "how ", "what ", "why "];
    if questiony.iter().any(|k| lower.contains(k)) {
        return SectionType::Question;
    }
    SectionType::Notes
}

/// Splits the text into sections along heading-like lines; bodies shorter
/// than a sentence are dropped as extraction noise.
fn sections_by_headings(text: &str) -> Vec<WriteUpSection> {
    const MIN_BODY: usize = 10;
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    let mut flush = |current: &mut Option<(String, Vec<String>)>, sections: &mut Vec<WriteUpSection>| {
        if let Some((title, body)) = current.take() {
            let content = body.join("\n").trim().to_string();
            if content.len() > MIN_BODY {
                let mut section = WriteUpSection::new(classify_heading(&title), title);
                section.content = content;
                sections.push(section);
            }
        }
    };

    for line in text.lines() {
        let line = line.trim();
        if is_heading(line) {
            flush(&mut current, &mut sections);
            let title = line
                .trim_start_matches('#')
                .trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim()
                .to_string();
            if !title.is_empty() {
                current = Some((title, Vec::new()));
            }
        } else if let Some((_, body)) = current.as_mut() {
            if !line.is_empty() {
                body.push(line.to_string());
            }
        }
    }
    flush(&mut current, &mut sections);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        assert!(matches!(
            extract("x.pdf", b"not a pdf at all"),
            Err(ImportError::Pdf(_))
        ));
    }

    #[test]
    fn flags_commands_and_network_are_split_out() {
        let text = "Scanning 10.10.10.245:80 with nmap\n\
                    $ nmap -sC -sV 10.10.10.245\n\
                    got the flag: HTB{c4p_own3d}\n\
                    served at http://10.10.10.245/data/1\n";
        let sections = classify_text(text);
        let flag = sections
            .iter()
            .find(|s| s.section_type == SectionType::Flag)
            .unwrap();
        assert!(flag.content.contains("HTB{c4p_own3d}"));
        assert_eq!(flag.flag_value.as_deref(), Some("HTB{c4p_own3d}"));
        let commands = sections.iter().find(|s| s.title == "Commands Used").unwrap();
        assert!(commands.content.contains("```bash"));
        assert!(commands.content.contains("nmap -sC -sV"));
        let network = sections
            .iter()
            .find(|s| s.title == "Network Information")
            .unwrap();
        assert!(network.content.contains("- 10.10.10.245:80"));
        assert!(network.content.contains("- http://10.10.10.245/data/1"));
    }

    #[test]
    fn headings_split_into_classified_sections() {
        let text = "PRIVILEGE ESCALATION\n\
                    Used a capabilities misconfiguration on python3.8 to get root access.\n\
                    Lessons Learned?\n\
                    Always check getcap output early in the engagement process.\n";
        let sections = sections_by_headings(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_type, SectionType::Step);
        assert!(sections[0].title.contains("PRIVILEGE"));
        assert_eq!(sections[1].section_type, SectionType::Question);
    }

    #[test]
    fn short_noise_bodies_are_dropped() {
        let text = "OVERVIEW\nok\nCONCLUSION\nThe machine was rooted through an IDOR and weak creds.\n";
        let sections = sections_by_headings(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "CONCLUSION");
    }

    #[test]
    fn empty_text_classifies_to_nothing() {
        assert!(classify_text("   \n  ").is_empty());
    }
}
