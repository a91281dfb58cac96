//! Merge-strategy dialog shown after a sections import (PDF or
//! sections-only JSON): replace the current user sections or append.

use yew::html::Scope;
use yew::prelude::*;

use common::import::json::MergeStrategy;

use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::WorkspaceComponent;
use crate::tops_sheet::top_sheet::TopSheet;

pub fn merge_dialog(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    let count = component.pending_sections.len();
    let origin = component.pending_origin.clone();

    html! {
        <TopSheet node_ref={component.merge_dialog_ref.clone()}>
            <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.6);z-index:9999;display:flex;align-items:center;justify-content:center;">
                <div style="background:#fff;border-radius:8px;padding:24px;min-width:420px;max-width:90vw;">
                    <h2 style="margin-top:0;">{ "Import sections" }</h2>
                    <p>
                        { format!("{count} section(s) found in {origin}. How should they be merged?") }
                    </p>
                    <ul style="font-size:0.85rem; color:#555;">
                        <li>{ "Replace: drops your current sections, keeps the suggested templates." }</li>
                        <li>{ "Append: keeps everything and adds the imported sections at the end." }</li>
                    </ul>
                    <div style="display:flex; gap:8px; justify-content:flex-end;">
                        <button onclick={link.callback(|_| Msg::MergeCancelled)}>{ "Cancel" }</button>
                        <button onclick={link.callback(|_| Msg::MergeChosen(MergeStrategy::ReplaceUserSections))}>
                            { "Replace my sections" }
                        </button>
                        <button onclick={link.callback(|_| Msg::MergeChosen(MergeStrategy::Append))}>
                            { "Append" }
                        </button>
                    </div>
                </div>
            </div>
        </TopSheet>
    }
}
