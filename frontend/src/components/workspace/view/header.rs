//! Header bar: app title, the Editor/Preview tabs (with the unsaved-dot
//! on Editor) and the document-level actions.

use yew::html::Scope;
use yew::prelude::*;

use common::model::AppView;
use common::store::Action;

use super::icon_button;
use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::WorkspaceComponent;

pub fn build_header(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    html! {
        <header
            class="app-header"
            style="display:flex; align-items:center; gap:12px; padding:8px 16px; border-bottom:1px solid #ddd;"
        >
            <h1 style="font-size:1.1rem; margin:0;">{ "CTF Write-up Builder" }</h1>
            <div class="tab-bar" style="flex:1;">
                { build_view_tab(component, link, AppView::Editor, "Editor") }
                { build_view_tab(component, link, AppView::Preview, "Preview") }
            </div>
            { icon_button("upload_file", "Import", link.callback(|_| Msg::OpenImportPicker)) }
            { icon_button("download", "Export", link.callback(|_| Msg::OpenExportDialog)) }
            { icon_button("restart_alt", "Reset", link.callback(|_| Msg::ResetRequested)) }
        </header>
    }
}

fn build_view_tab(
    component: &WorkspaceComponent,
    link: &Scope<WorkspaceComponent>,
    view: AppView,
    label: &'static str,
) -> Html {
    let active = component.state.current_view == view;
    let show_dot = view == AppView::Editor && component.state.is_dirty;
    html! {
        <button
            class={classes!("tab-btn", active.then_some("active"))}
            style="position: relative;"
            onclick={link.callback(move |_| Msg::Apply(Action::SetView(view)))}
        >
            { label }
            {
                if show_dot {
                    html! {
                        <span
                            title="Unsaved changes"
                            style="
                                position: absolute;
                                top: 4px;
                                right: 6px;
                                width: 8px;
                                height: 8px;
                                background: #e53935;
                                border-radius: 50%;
                                display: inline-block;
                            "
                        />
                    }
                } else {
                    html! {}
                }
            }
        </button>
    }
}
