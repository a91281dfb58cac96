//! Single-section editor pane: title, type, the type-specific fields
//! (answer / flag value), the Markdown body and the screenshot strip.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::{SectionType, WriteUpSection};
use common::store::{Action, SectionPatch};

use super::icon_button;
use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::{ScreenshotTarget, WorkspaceComponent};

pub fn build_section_editor(
    component: &WorkspaceComponent,
    link: &Scope<WorkspaceComponent>,
) -> Html {
    let Some(section) = component.state.active_section() else {
        return html! {
            <div style="padding:32px; color:#888; text-align:center;">
                { "Select a section on the left, or add a new one." }
            </div>
        };
    };

    html! {
        <section class="section-editor" style="border:1px solid #ddd; border-radius:6px; padding:12px;">
            <div style="display:flex; gap:8px; align-items:center; margin-bottom:10px;">
                <input
                    style="flex:1; padding:6px; font-size:1rem;"
                    value={section.title.clone()}
                    placeholder="Section title"
                    oninput={patch_callback(link, &section.id, |value| SectionPatch {
                        title: Some(value),
                        ..Default::default()
                    })}
                />
                { build_type_select(link, section) }
                {
                    icon_button("auto_awesome", "AI assist", {
                        let id = section.id.clone();
                        link.callback(move |_| Msg::OpenAiDialog(id.clone()))
                    })
                }
            </div>

            { build_typed_field(link, section) }

            <textarea
                style="width:100%; min-height:320px; padding:8px; font-family:monospace; resize:vertical;"
                value={section.content.clone()}
                spellcheck="false"
                placeholder="Markdown content..."
                oninput={
                    let id = section.id.clone();
                    link.callback(move |e: InputEvent| {
                        let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::Apply(Action::UpdateSection {
                            id: id.clone(),
                            patch: SectionPatch {
                                content: Some(textarea.value()),
                                ..Default::default()
                            },
                        })
                    })
                }
            />

            { build_screenshots(link, section) }
        </section>
    }
}

fn build_type_select(link: &Scope<WorkspaceComponent>, section: &WriteUpSection) -> Html {
    let id = section.id.clone();
    let current = section.section_type;
    html! {
        <select
            onchange={link.callback(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let idx = select.selected_index().max(0) as usize;
                let section_type = *SectionType::ALL.get(idx).unwrap_or(&SectionType::Notes);
                Msg::Apply(Action::UpdateSection {
                    id: id.clone(),
                    patch: SectionPatch {
                        section_type: Some(section_type),
                        ..Default::default()
                    },
                })
            })}
        >
            {
                SectionType::ALL.iter().map(|t| html! {
                    <option selected={*t == current}>{ t.label() }</option>
                }).collect::<Html>()
            }
        </select>
    }
}

/// Questions get an answer field, flags get the flag value; other types
/// have no extra field.
fn build_typed_field(link: &Scope<WorkspaceComponent>, section: &WriteUpSection) -> Html {
    match section.section_type {
        SectionType::Question => html! {
            <input
                style="width:100%; padding:6px; margin-bottom:10px;"
                value={section.answer.clone().unwrap_or_default()}
                placeholder="Answer"
                oninput={patch_callback(link, &section.id, |value| SectionPatch {
                    answer: Some(value),
                    ..Default::default()
                })}
            />
        },
        SectionType::Flag => html! {
            <input
                style="width:100%; padding:6px; margin-bottom:10px; font-family:monospace;"
                value={section.flag_value.clone().unwrap_or_default()}
                placeholder="flag{...}"
                oninput={patch_callback(link, &section.id, |value| SectionPatch {
                    flag_value: Some(value),
                    ..Default::default()
                })}
            />
        },
        SectionType::Step | SectionType::Notes => html! {},
    }
}

fn build_screenshots(link: &Scope<WorkspaceComponent>, section: &WriteUpSection) -> Html {
    let section_id = section.id.clone();
    html! {
        <div style="margin-top:10px;">
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                {
                    section.screenshots.iter().map(|screenshot| {
                        let section_id = section.id.clone();
                        let screenshot_id = screenshot.id.clone();
                        html! {
                            <figure style="margin:0; text-align:center;">
                                <img
                                    src={screenshot.data_url.clone()}
                                    alt={screenshot.name.clone()}
                                    style="max-width:160px; max-height:120px; border:1px solid #ccc; border-radius:4px;"
                                />
                                <figcaption style="font-size:0.75rem;">
                                    { screenshot.name.clone() }
                                    <button
                                        title="Delete screenshot"
                                        onclick={link.callback(move |_| Msg::Apply(Action::DeleteScreenshot {
                                            section_id: section_id.clone(),
                                            screenshot_id: screenshot_id.clone(),
                                        }))}
                                    >
                                        { "✕" }
                                    </button>
                                </figcaption>
                            </figure>
                        }
                    }).collect::<Html>()
                }
            </div>
            <button
                style="margin-top:6px;"
                onclick={link.callback(move |_| Msg::OpenScreenshotPicker(
                    ScreenshotTarget::Section(section_id.clone())
                ))}
            >
                { "Add screenshot" }
            </button>
        </div>
    }
}

fn patch_callback(
    link: &Scope<WorkspaceComponent>,
    section_id: &str,
    build: fn(String) -> SectionPatch,
) -> Callback<InputEvent> {
    let id = section_id.to_string();
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Apply(Action::UpdateSection {
            id: id.clone(),
            patch: build(input.value()),
        })
    })
}
