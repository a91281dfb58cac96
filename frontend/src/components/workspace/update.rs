//! Update function for the workspace component, Elm-style: every message
//! either runs an [`Action`] through the pure reducer or performs a DOM /
//! network side effect and reports back as another message.

use gloo_file::futures::{read_as_bytes, read_as_data_url, read_as_text};
use gloo_file::Blob;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::export::{self, file_slug};
use common::import;
use common::import::json::MergeStrategy;
use common::model::Screenshot;
use common::store::{reduce, Action, SectionPatch};

use crate::ai;
use crate::storage;
use crate::tops_sheet::top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{confirm, download_file, open_print_window, show_toast, today_string};
use super::messages::Msg;
use super::state::{ScreenshotTarget, WorkspaceComponent};

pub fn update(
    component: &mut WorkspaceComponent,
    ctx: &Context<WorkspaceComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Apply(action) => {
            apply(component, ctx, action);
            true
        }
        Msg::FlushDraft(ticket) => {
            if component.save.is_current(ticket) && component.state.is_dirty {
                if storage::save_draft(&component.state.write_up) {
                    component.state = reduce(&component.state, Action::SetDirty(false));
                    return true;
                }
                show_toast("Could not save the draft locally.");
            }
            false
        }

        Msg::OpenImportPicker => {
            if let Some(input) = component.import_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ImportFileSelected(file) => {
            let name = file.name();
            let lower = name.to_lowercase();
            let link = ctx.link().clone();
            if lower.ends_with(".pdf") {
                spawn_local(async move {
                    match read_as_bytes(&Blob::from(file)).await {
                        Ok(bytes) => match import::pdf::extract(&name, &bytes) {
                            Ok(sections) => link.send_message(Msg::ImportedSectionsReady {
                                origin: name,
                                sections,
                            }),
                            Err(err) => link.send_message(Msg::ImportFailed(err.to_string())),
                        },
                        Err(err) => link.send_message(Msg::ImportFailed(err.to_string())),
                    }
                });
            } else if lower.ends_with(".json")
                || lower.ends_with(".md")
                || lower.ends_with(".markdown")
            {
                spawn_local(async move {
                    match read_as_text(&Blob::from(file)).await {
                        Ok(text) => link.send_message(classify_text_import(&name, &text)),
                        Err(err) => link.send_message(Msg::ImportFailed(err.to_string())),
                    }
                });
            } else {
                show_toast("Unsupported file type. Use .json, .md or .pdf.");
            }
            false
        }
        Msg::ImportedDocumentReady(write_up) => {
            if confirm("Replace the current write-up with the imported document?") {
                apply(component, ctx, Action::LoadWriteUp(*write_up));
                show_toast("Write-up imported.");
                return true;
            }
            false
        }
        Msg::ImportedSectionsReady { origin, sections } => {
            component.pending_origin = origin;
            component.pending_sections = sections;
            open_top_sheet(component.merge_dialog_ref.clone());
            true
        }
        Msg::ImportFailed(message) => {
            show_toast(&format!("Import failed: {message}"));
            false
        }
        Msg::MergeChosen(strategy) => {
            let sections = std::mem::take(&mut component.pending_sections);
            let origin = std::mem::take(&mut component.pending_origin);
            let count = sections.len();
            close_top_sheet(component.merge_dialog_ref.clone());
            match strategy {
                MergeStrategy::ReplaceUserSections => {
                    let merged =
                        import::json::replace_user_sections(&component.state.write_up, sections);
                    apply(component, ctx, Action::LoadWriteUp(merged));
                }
                MergeStrategy::Append => {
                    apply(component, ctx, Action::AddImportedSections(sections));
                }
            }
            show_toast(&format!("Imported {count} section(s) from {origin}."));
            true
        }
        Msg::MergeCancelled => {
            component.pending_sections.clear();
            component.pending_origin.clear();
            close_top_sheet(component.merge_dialog_ref.clone());
            true
        }

        Msg::OpenScreenshotPicker(target) => {
            component.screenshot_target = Some(target);
            if let Some(input) = component
                .screenshot_input_ref
                .cast::<web_sys::HtmlInputElement>()
            {
                input.click();
            }
            false
        }
        Msg::ScreenshotFileSelected(file) => {
            let name = file.name();
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_data_url(&Blob::from(file)).await {
                    Ok(data_url) => link.send_message(Msg::ScreenshotRead { name, data_url }),
                    Err(err) => {
                        link.send_message(Msg::ImportFailed(format!("could not read image: {err}")))
                    }
                }
            });
            false
        }
        Msg::ScreenshotRead { name, data_url } => {
            let screenshot = Screenshot::new(name, data_url);
            match component.screenshot_target.take() {
                Some(ScreenshotTarget::Section(section_id)) => {
                    apply(
                        component,
                        ctx,
                        Action::AddScreenshot {
                            section_id,
                            screenshot,
                        },
                    );
                    true
                }
                Some(ScreenshotTarget::MachineImage) => {
                    apply(component, ctx, Action::SetMachineImage(Some(screenshot)));
                    true
                }
                None => false,
            }
        }

        Msg::OpenExportDialog => {
            open_top_sheet(component.export_dialog_ref.clone());
            true
        }
        Msg::CloseExportDialog => {
            close_top_sheet(component.export_dialog_ref.clone());
            true
        }
        Msg::SetExportTheme(theme) => {
            component.export_options.theme = theme;
            true
        }
        Msg::ToggleExportHeader => {
            component.export_options.include_header = !component.export_options.include_header;
            true
        }
        Msg::ToggleExportFooter => {
            component.export_options.include_footer = !component.export_options.include_footer;
            true
        }
        Msg::SetExportHeaderText(text) => {
            component.export_options.header_text = text;
            true
        }
        Msg::SetExportFooterText(text) => {
            component.export_options.footer_text = text;
            true
        }
        Msg::ExportMarkdown => {
            match export::markdown::render(&component.state.write_up) {
                Ok(markdown) => {
                    let file_name = format!("{}.md", file_slug(&component.state.write_up.title));
                    download_file(&file_name, "text/markdown", &markdown);
                    show_toast("Markdown exported.");
                }
                Err(err) => show_toast(&format!("Cannot export: {err}")),
            }
            false
        }
        Msg::ExportJson => {
            let json = export::json_backup(&component.state.write_up);
            let file_name = format!("{}.json", file_slug(&component.state.write_up.title));
            download_file(&file_name, "application/json", &json);
            show_toast("Backup exported.");
            false
        }
        Msg::ExportPdf => {
            match export::html::render(&component.state.write_up, &component.export_options) {
                Ok(html) => {
                    open_print_window(&html);
                    close_top_sheet(component.export_dialog_ref.clone());
                }
                Err(err) => show_toast(&format!("Cannot export: {err}")),
            }
            true
        }

        Msg::OpenAiDialog(section_id) => {
            if let Some(section) = component.state.write_up.section(&section_id) {
                component.ai.prompt = ai::prompt_for(&component.state.write_up, section);
                component.ai.target_section = Some(section_id);
                open_top_sheet(component.ai_dialog_ref.clone());
            }
            true
        }
        Msg::CloseAiDialog => {
            component.ai.target_section = None;
            close_top_sheet(component.ai_dialog_ref.clone());
            true
        }
        Msg::SetAiProvider(provider) => {
            component.ai.provider = provider;
            storage::save_setting(storage::PROVIDER_KEY, provider.id());
            true
        }
        Msg::SetAiApiKey(key) => {
            storage::save_setting(storage::API_KEY_KEY, &key);
            component.ai.api_key = key;
            true
        }
        Msg::SetAiPrompt(prompt) => {
            component.ai.prompt = prompt;
            true
        }
        Msg::RunAi => {
            if component.ai.busy {
                return false;
            }
            let Some(section_id) = component.ai.target_section.clone() else {
                return false;
            };
            if component.ai.api_key.trim().is_empty() {
                show_toast("Enter an API key first.");
                return false;
            }
            component.ai.busy = true;
            let provider = component.ai.provider;
            let api_key = component.ai.api_key.clone();
            let prompt = component.ai.prompt.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = ai::generate(provider, &api_key, &prompt).await;
                link.send_message(Msg::AiFinished { section_id, result });
            });
            true
        }
        Msg::AiFinished { section_id, result } => {
            component.ai.busy = false;
            match result {
                Ok(content) => {
                    let existing = component
                        .state
                        .write_up
                        .section(&section_id)
                        .map(|section| section.content.as_str());
                    match merge_generated(existing, &content) {
                        Some(merged) => {
                            apply(
                                component,
                                ctx,
                                Action::UpdateSection {
                                    id: section_id,
                                    patch: SectionPatch {
                                        content: Some(merged),
                                        ..Default::default()
                                    },
                                },
                            );
                            show_toast("Content generated.");
                        }
                        None => show_toast("The section was deleted while generating."),
                    }
                    component.ai.target_section = None;
                    close_top_sheet(component.ai_dialog_ref.clone());
                }
                Err(err) => show_toast(&format!("Generation failed: {err}")),
            }
            true
        }

        Msg::DeleteSectionRequested(section_id) => {
            if confirm("Delete this section? This cannot be undone.") {
                apply(component, ctx, Action::DeleteSection(section_id));
                return true;
            }
            false
        }
        Msg::ResetRequested => {
            if confirm("Discard the whole write-up and start over?") {
                storage::clear_draft();
                apply(
                    component,
                    ctx,
                    Action::ResetWriteUp {
                        today: today_string(),
                    },
                );
                return true;
            }
            false
        }
    }
}

/// Runs an action through the reducer; content changes arm the trailing
/// save debounce.
fn apply(component: &mut WorkspaceComponent, ctx: &Context<WorkspaceComponent>, action: Action) {
    let content_change = !matches!(
        action,
        Action::SetActiveSection(_) | Action::SetView(_) | Action::SetDirty(_)
    );
    component.state = reduce(&component.state, action);
    if content_change {
        let ticket = component.save.schedule();
        let link = ctx.link().clone();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(1000).await;
            link.send_message(Msg::FlushDraft(ticket));
        });
    }
}

/// Appends generated text to the section's existing body, blank-line
/// separated. `None` when the target section no longer exists, so the
/// caller applies nothing and reports the miss instead of success.
fn merge_generated(existing: Option<&str>, generated: &str) -> Option<String> {
    let existing = existing?;
    Some(if existing.trim().is_empty() {
        generated.to_string()
    } else {
        format!("{}\n\n{}", existing.trim_end(), generated)
    })
}

/// Decides what a text import is: Markdown files become one appended
/// section; a JSON object with a `title` is treated as a whole-document
/// backup, anything else must carry a `sections` array.
fn classify_text_import(name: &str, text: &str) -> Msg {
    let lower = name.to_lowercase();
    if lower.ends_with(".md") || lower.ends_with(".markdown") {
        let section = import::markdown::section_from_markdown(name, text);
        return Msg::Apply(Action::AddPrebuiltSection(section));
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) if value.get("title").is_some() => {
            match import::json::parse_document(text, &today_string()) {
                Ok(write_up) => Msg::ImportedDocumentReady(Box::new(write_up)),
                Err(err) => Msg::ImportFailed(err.to_string()),
            }
        }
        _ => match import::json::parse_sections(text) {
            Ok(sections) => Msg::ImportedSectionsReady {
                origin: name.to_string(),
                sections,
            },
            Err(err) => Msg::ImportFailed(err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::merge_generated;

    #[test]
    fn generated_text_appends_after_a_blank_line() {
        assert_eq!(
            merge_generated(Some("notes so far\n"), "more findings"),
            Some("notes so far\n\nmore findings".to_string())
        );
    }

    #[test]
    fn an_empty_body_takes_the_generated_text_as_is() {
        assert_eq!(
            merge_generated(Some("   \n"), "fresh content"),
            Some("fresh content".to_string())
        );
    }

    #[test]
    fn a_deleted_target_section_produces_no_update() {
        assert_eq!(merge_generated(None, "late response"), None);
    }
}
