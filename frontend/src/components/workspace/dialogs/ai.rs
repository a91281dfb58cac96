//! AI assist dialog: provider choice, API key and the prompt that will be
//! sent. The key goes only to the selected provider.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::ai::AiProvider;
use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::WorkspaceComponent;
use crate::tops_sheet::top_sheet::TopSheet;

pub fn ai_dialog(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    let ai = &component.ai;

    html! {
        <TopSheet node_ref={component.ai_dialog_ref.clone()}>
            <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.6);z-index:9999;display:flex;align-items:center;justify-content:center;">
                <div style="background:#fff;border-radius:8px;padding:24px;min-width:480px;max-width:90vw;">
                    <h2 style="margin-top:0;">{ "Generate section content" }</h2>

                    <label>{ "Provider" }</label>
                    <select
                        style="display:block; margin:2px 0 10px; padding:4px;"
                        onchange={link.callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            let idx = select.selected_index().max(0) as usize;
                            Msg::SetAiProvider(*AiProvider::ALL.get(idx).unwrap_or(&AiProvider::OpenAi))
                        })}
                    >
                        {
                            AiProvider::ALL.iter().map(|provider| html! {
                                <option selected={*provider == ai.provider}>{ provider.label() }</option>
                            }).collect::<Html>()
                        }
                    </select>

                    <label>{ "API key" }</label>
                    <input
                        type="password"
                        style="display:block; width:100%; margin:2px 0 4px; padding:6px;"
                        value={ai.api_key.clone()}
                        placeholder="sk-..."
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetAiApiKey(input.value())
                        })}
                    />
                    <p style="font-size:0.75rem; color:#777; margin:0 0 10px;">
                        { "The key stays in this browser and is sent only to the selected provider." }
                    </p>

                    <label>{ "Prompt" }</label>
                    <textarea
                        style="width:100%; min-height:140px; padding:6px;"
                        value={ai.prompt.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                            Msg::SetAiPrompt(textarea.value())
                        })}
                    />

                    <div style="display:flex; gap:8px; justify-content:flex-end; margin-top:12px;">
                        <button onclick={link.callback(|_| Msg::CloseAiDialog)} disabled={ai.busy}>
                            { "Cancel" }
                        </button>
                        <button onclick={link.callback(|_| Msg::RunAi)} disabled={ai.busy}>
                            { if ai.busy { "Generating…" } else { "Generate" } }
                        </button>
                    </div>
                </div>
            </div>
        </TopSheet>
    }
}
