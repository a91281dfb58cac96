//! General-information panel: document metadata and the machine image.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::{Difficulty, OperatingSystem};
use common::store::{Action, GeneralInfoPatch};

use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::{ScreenshotTarget, WorkspaceComponent};

const FIELD_STYLE: &str = "display:block; width:100%; margin:2px 0 10px; padding:6px;";

pub fn build_general_info(
    component: &WorkspaceComponent,
    link: &Scope<WorkspaceComponent>,
) -> Html {
    let write_up = &component.state.write_up;

    html! {
        <section class="general-info" style="border:1px solid #ddd; border-radius:6px; padding:12px; margin-bottom:16px;">
            <h2 style="font-size:1rem; margin:0 0 8px;">{ "General Information" }</h2>

            <label>{ "Machine name" }</label>
            <input
                style={FIELD_STYLE}
                value={write_up.title.clone()}
                placeholder="e.g. HTB Cap"
                oninput={patch_callback(link, |value| GeneralInfoPatch { title: Some(value), ..Default::default() })}
            />

            <label>{ "Author" }</label>
            <input
                style={FIELD_STYLE}
                value={write_up.author.clone()}
                oninput={patch_callback(link, |value| GeneralInfoPatch { author: Some(value), ..Default::default() })}
            />

            <label>{ "Date" }</label>
            <input
                type="date"
                style={FIELD_STYLE}
                value={write_up.date.clone()}
                oninput={patch_callback(link, |value| GeneralInfoPatch { date: Some(value), ..Default::default() })}
            />

            <label>{ "Difficulty" }</label>
            <select
                style={FIELD_STYLE}
                onchange={link.callback(|e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    let idx = select.selected_index().max(0) as usize;
                    let difficulty = *Difficulty::ALL.get(idx).unwrap_or(&Difficulty::Medium);
                    Msg::Apply(Action::UpdateGeneralInfo(GeneralInfoPatch {
                        difficulty: Some(difficulty),
                        ..Default::default()
                    }))
                })}
            >
                {
                    Difficulty::ALL.iter().map(|d| html! {
                        <option selected={*d == write_up.difficulty}>{ d.label() }</option>
                    }).collect::<Html>()
                }
            </select>

            <label>{ "Operating system" }</label>
            <select
                style={FIELD_STYLE}
                onchange={link.callback(|e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    let idx = select.selected_index().max(0) as usize;
                    let os = *OperatingSystem::ALL.get(idx).unwrap_or(&OperatingSystem::Linux);
                    Msg::Apply(Action::UpdateGeneralInfo(GeneralInfoPatch {
                        os: Some(os),
                        ..Default::default()
                    }))
                })}
            >
                {
                    OperatingSystem::ALL.iter().map(|os| html! {
                        <option selected={*os == write_up.os}>{ os.label() }</option>
                    }).collect::<Html>()
                }
            </select>

            <label>{ "Tags (comma separated)" }</label>
            <input
                style={FIELD_STYLE}
                value={write_up.tags.join(", ")}
                placeholder="linux, web, sqli"
                onchange={link.callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    let tags: Vec<String> = input
                        .value()
                        .split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                    Msg::Apply(Action::UpdateGeneralInfo(GeneralInfoPatch {
                        tags: Some(tags),
                        ..Default::default()
                    }))
                })}
            />

            { build_machine_image(component, link) }
        </section>
    }
}

fn build_machine_image(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    match &component.state.write_up.machine_image {
        Some(image) => html! {
            <div style="display:flex; align-items:center; gap:8px;">
                <img
                    src={image.data_url.clone()}
                    alt={image.name.clone()}
                    style="max-width:80px; max-height:80px; border-radius:4px;"
                />
                <button onclick={link.callback(|_| Msg::Apply(Action::SetMachineImage(None)))}>
                    { "Remove machine image" }
                </button>
            </div>
        },
        None => html! {
            <button onclick={link.callback(|_| Msg::OpenScreenshotPicker(ScreenshotTarget::MachineImage))}>
                { "Add machine image" }
            </button>
        },
    }
}

fn patch_callback(
    link: &Scope<WorkspaceComponent>,
    build: fn(String) -> GeneralInfoPatch,
) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Apply(Action::UpdateGeneralInfo(build(input.value())))
    })
}
