//! View rendering for the workspace component.
//!
//! The layout has a header with the view tabs and document-level actions,
//! an editor view (general info + section list on the left, the single
//! section editor on the right) and a full-document preview view. Dialogs
//! (export options, merge strategy, AI assist) are always mounted at the
//! bottom as top sheets.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use common::model::AppView;

use super::dialogs;
use super::messages::Msg;
use super::state::WorkspaceComponent;

mod general_info;
mod header;
mod preview;
mod section_editor;
mod structure;

pub fn view(component: &WorkspaceComponent, ctx: &Context<WorkspaceComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="workspace-root">
            { header::build_header(component, link) }
            {
                match component.state.current_view {
                    AppView::Editor => html! {
                        <div style="display:flex; align-items:flex-start; gap:16px; padding:16px;">
                            <aside style="width:340px; flex-shrink:0;">
                                { general_info::build_general_info(component, link) }
                                { structure::build_structure(component, link) }
                            </aside>
                            <main style="flex:1; min-width:0;">
                                { section_editor::build_section_editor(component, link) }
                            </main>
                        </div>
                    },
                    AppView::Preview => preview::build_preview(component),
                }
            }
            { dialogs::export::export_dialog(component, link) }
            { dialogs::merge::merge_dialog(component, link) }
            { dialogs::ai::ai_dialog(component, link) }
            { build_file_inputs(component, link) }
        </div>
    }
}

/// Hidden file inputs backing the import and screenshot pickers. The value
/// reset lets the same file be picked twice in a row.
fn build_file_inputs(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    html! {
        <>
            <input
                type="file"
                ref={component.import_input_ref.clone()}
                accept=".json,.md,.markdown,.pdf"
                style="display:none;"
                onchange={link.batch_callback(|e: Event| take_picked_file(e).map(Msg::ImportFileSelected))}
            />
            <input
                type="file"
                ref={component.screenshot_input_ref.clone()}
                accept="image/*"
                style="display:none;"
                onchange={link.batch_callback(|e: Event| take_picked_file(e).map(Msg::ScreenshotFileSelected))}
            />
        </>
    }
}

fn take_picked_file(e: Event) -> Option<web_sys::File> {
    let input = e.target()?.dyn_into::<HtmlInputElement>().ok()?;
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

/// Renders a toolbar button with a Material icon and a label.
pub(super) fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click.clone()}>
            <i class="material-icons">{icon_name}</i>
            <span class="icon-label">{label}</span>
        </button>
    }
}
