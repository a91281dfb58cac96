//! Themed standalone HTML rendering of the write-up, handed to the
//! browser's print dialog for the PDF export path. Markdown bodies go
//! through `pulldown_cmark`; screenshots are inlined as data-URL images.

use pulldown_cmark::{Event, Parser, html};
use serde::{Deserialize, Serialize};

use crate::export::{ExportError, validate};
use crate::model::{SectionType, WriteUp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfTheme {
    Hacker,
    ProfessionalLight,
    ProfessionalDark,
    Minimal,
}

impl PdfTheme {
    pub const ALL: [PdfTheme; 4] = [
        PdfTheme::Hacker,
        PdfTheme::ProfessionalLight,
        PdfTheme::ProfessionalDark,
        PdfTheme::Minimal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PdfTheme::Hacker => "Hacker",
            PdfTheme::ProfessionalLight => "Professional (light)",
            PdfTheme::ProfessionalDark => "Professional (dark)",
            PdfTheme::Minimal => "Minimal",
        }
    }

    fn css(&self) -> &'static str {
        match self {
            PdfTheme::Hacker => {
                "body{background:#0d1117;color:#2ea043;font-family:'Fira Code',monospace;}\
                 h1,h2{color:#3fb950;border-bottom:1px solid #2ea043;}\
                 code,pre{background:#161b22;color:#7ee787;}\
                 blockquote{border-left:3px solid #3fb950;padding-left:8px;color:#7ee787;}"
            }
            PdfTheme::ProfessionalLight => {
                "body{background:#fff;color:#1f2328;font-family:Georgia,serif;}\
                 h1,h2{color:#0a3069;border-bottom:1px solid #d0d7de;}\
                 code,pre{background:#f6f8fa;color:#1f2328;}\
                 blockquote{border-left:3px solid #0a3069;padding-left:8px;}"
            }
            PdfTheme::ProfessionalDark => {
                "body{background:#1f2328;color:#e6edf3;font-family:Georgia,serif;}\
                 h1,h2{color:#79c0ff;border-bottom:1px solid #444c56;}\
                 code,pre{background:#2d333b;color:#adbac7;}\
                 blockquote{border-left:3px solid #79c0ff;padding-left:8px;}"
            }
            PdfTheme::Minimal => {
                "body{background:#fff;color:#000;font-family:Helvetica,Arial,sans-serif;}\
                 h1,h2{border-bottom:1px solid #000;}\
                 code,pre{background:#eee;}\
                 blockquote{border-left:3px solid #000;padding-left:8px;}"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfExportOptions {
    pub theme: PdfTheme,
    pub include_header: bool,
    pub include_footer: bool,
    pub header_text: String,
    pub footer_text: String,
    /// Injects a `window.print()` call so the print dialog opens as soon
    /// as the exported document loads.
    pub auto_print: bool,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            theme: PdfTheme::Hacker,
            include_header: true,
            include_footer: true,
            header_text: String::new(),
            footer_text: String::new(),
            auto_print: true,
        }
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Parses markdown text into HTML using pulldown_cmark. Raw HTML in the
/// source (which the parser would otherwise pass through verbatim) is
/// demoted to escaped text: section bodies can come from imported files,
/// and the result is injected into the preview DOM and the print
/// document.
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new(input).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub fn render(write_up: &WriteUp, options: &PdfExportOptions) -> Result<String, ExportError> {
    let sections = validate(write_up)?;

    let mut body = String::new();
    if options.include_header {
        let header = if options.header_text.trim().is_empty() {
            &write_up.title
        } else {
            &options.header_text
        };
        body.push_str(&format!(
            "<header class=\"page-header\">{}</header>\n",
            escape_html(header)
        ));
    }

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&write_up.title)));
    body.push_str("<ul class=\"meta\">\n");
    body.push_str(&format!(
        "<li><b>Author:</b> {}</li>\n",
        escape_html(&write_up.author)
    ));
    body.push_str(&format!("<li><b>Date:</b> {}</li>\n", escape_html(&write_up.date)));
    body.push_str(&format!(
        "<li><b>Difficulty:</b> {}</li>\n",
        write_up.difficulty.label()
    ));
    body.push_str(&format!("<li><b>OS:</b> {}</li>\n", write_up.os.label()));
    if !write_up.tags.is_empty() {
        body.push_str(&format!(
            "<li><b>Tags:</b> {}</li>\n",
            escape_html(&write_up.tags.join(", "))
        ));
    }
    body.push_str("</ul>\n<hr>\n");

    if let Some(image) = &write_up.machine_image {
        body.push_str(&format!(
            "<img class=\"machine-image\" src=\"{}\" alt=\"{}\">\n",
            escape_html(&image.data_url),
            escape_html(&image.name)
        ));
    }

    for (index, section) in sections.iter().enumerate() {
        body.push_str("<section>\n");
        body.push_str(&format!(
            "<h2>{}. {}</h2>\n",
            index + 1,
            escape_html(&section.title)
        ));
        if section.section_type == SectionType::Question {
            if let Some(answer) = section.answer.as_deref().filter(|a| !a.trim().is_empty()) {
                body.push_str(&format!(
                    "<blockquote><b>Answer:</b> {}</blockquote>\n",
                    escape_html(answer)
                ));
            }
        }
        if section.section_type == SectionType::Flag {
            if let Some(flag) = section.flag_value.as_deref().filter(|f| !f.trim().is_empty()) {
                body.push_str(&format!(
                    "<blockquote><b>Flag:</b> <code>{}</code></blockquote>\n",
                    escape_html(flag)
                ));
            }
        }
        body.push_str(&markdown_to_html(&section.content));
        for screenshot in &section.screenshots {
            body.push_str(&format!(
                "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
                escape_html(&screenshot.data_url),
                escape_html(&screenshot.name),
                escape_html(&screenshot.name)
            ));
        }
        body.push_str("</section>\n");
    }

    if options.include_footer {
        let footer = if options.footer_text.trim().is_empty() {
            format!("{} — {}", write_up.author, write_up.date)
        } else {
            options.footer_text.clone()
        };
        body.push_str(&format!(
            "<footer class=\"page-footer\">{}</footer>\n",
            escape_html(&footer)
        ));
    }

    let print_script = if options.auto_print {
        "<script>window.addEventListener('load',function(){window.print();});</script>"
    } else {
        ""
    };

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{theme}\nimg{{max-width:100%;}}\n\
         .page-header,.page-footer{{text-align:center;font-size:0.8em;opacity:0.8;}}\n\
         section{{page-break-inside:avoid;margin-bottom:1.5em;}}\n\
         body{{margin:2em auto;max-width:52em;padding:0 1em;}}\n</style>\n\
         </head>\n<body>\n{body}{script}\n</body>\n</html>\n",
        title = escape_html(&write_up.title),
        theme = options.theme.css(),
        body = body,
        script = print_script,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{Screenshot, WriteUpSection};

    fn doc() -> WriteUp {
        let mut wu = catalog::default_write_up("2025-06-01");
        wu.title = "HTB <Cap>".into();
        wu.author = "0xdf".into();
        let mut section = WriteUpSection::new(SectionType::Step, "Recon");
        section.content = "Ran `nmap -sC`\n\n- port 21\n- port 80".into();
        section
            .screenshots
            .push(Screenshot::new("scan.png", "data:image/png;base64,AA"));
        wu.sections.push(section);
        wu
    }

    #[test]
    fn renders_markdown_bodies_and_escapes_metadata() {
        let html = render(&doc(), &PdfExportOptions::default()).unwrap();
        assert!(html.contains("<h1>HTB &lt;Cap&gt;</h1>"));
        assert!(html.contains("<code>nmap -sC</code>"));
        assert!(html.contains("<li>port 21</li>"));
        assert!(html.contains("data:image/png;base64,AA"));
    }

    #[test]
    fn auto_print_is_optional() {
        let mut options = PdfExportOptions::default();
        options.auto_print = false;
        let html = render(&doc(), &options).unwrap();
        assert!(!html.contains("window.print"));
        options.auto_print = true;
        let html = render(&doc(), &options).unwrap();
        assert!(html.contains("window.print"));
    }

    #[test]
    fn validation_applies_to_html_export_too() {
        let mut wu = doc();
        wu.date.clear();
        assert_eq!(
            render(&wu, &PdfExportOptions::default()),
            Err(ExportError::MissingDate)
        );
    }

    #[test]
    fn raw_html_in_markdown_is_neutralized() {
        let out = markdown_to_html("hello\n\n<script>alert(document.title)</script>\n");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
        let out = markdown_to_html("an <img src=x onerror=alert(1)> inline");
        assert!(!out.contains("<img"));
    }

    #[test]
    fn raw_html_in_section_body_stays_inert_in_export() {
        let mut wu = doc();
        wu.sections.last_mut().unwrap().content =
            "intro\n\n<script>alert(1)</script>".into();
        let mut options = PdfExportOptions::default();
        options.auto_print = false;
        let html = render(&wu, &options).unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn screenshot_data_url_cannot_break_out_of_the_attribute() {
        let mut wu = doc();
        wu.sections.last_mut().unwrap().screenshots = vec![Screenshot::new(
            "evil.png",
            "\"><script>alert(1)</script>",
        )];
        wu.machine_image = Some(Screenshot::new("box.png", "\"><script>alert(2)</script>"));
        let mut options = PdfExportOptions::default();
        options.auto_print = false;
        let html = render(&wu, &options).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("src=\"&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn each_theme_produces_distinct_css() {
        let wu = doc();
        let mut seen = Vec::new();
        for theme in PdfTheme::ALL {
            let options = PdfExportOptions {
                theme,
                ..Default::default()
            };
            let html = render(&wu, &options).unwrap();
            assert!(!seen.contains(&html));
            seen.push(html);
        }
    }
}
