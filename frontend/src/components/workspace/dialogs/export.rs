//! Export dialog: Markdown / JSON backup downloads and the themed
//! print-to-PDF view with its header/footer options.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use common::export::html::PdfTheme;

use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::WorkspaceComponent;
use crate::tops_sheet::top_sheet::TopSheet;

pub fn export_dialog(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    let options = &component.export_options;

    html! {
        <TopSheet node_ref={component.export_dialog_ref.clone()}>
            <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.6);z-index:9999;display:flex;align-items:center;justify-content:center;">
                <div style="background:#fff;border-radius:8px;padding:24px;min-width:420px;max-width:90vw;">
                    <h2 style="margin-top:0;">{ "Export" }</h2>

                    <div style="display:flex; gap:8px; margin-bottom:16px;">
                        <button onclick={link.callback(|_| Msg::ExportMarkdown)}>{ "Markdown (.md)" }</button>
                        <button onclick={link.callback(|_| Msg::ExportJson)}>{ "JSON backup" }</button>
                    </div>

                    <h3>{ "Print / PDF" }</h3>
                    <label>{ "Theme" }</label>
                    <select
                        style="display:block; margin:2px 0 10px; padding:4px;"
                        onchange={link.callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            let idx = select.selected_index().max(0) as usize;
                            Msg::SetExportTheme(*PdfTheme::ALL.get(idx).unwrap_or(&PdfTheme::Hacker))
                        })}
                    >
                        {
                            PdfTheme::ALL.iter().map(|theme| html! {
                                <option selected={*theme == options.theme}>{ theme.label() }</option>
                            }).collect::<Html>()
                        }
                    </select>

                    <label style="display:block;">
                        <input
                            type="checkbox"
                            checked={options.include_header}
                            onchange={link.callback(|_| Msg::ToggleExportHeader)}
                        />
                        { " Page header" }
                    </label>
                    {
                        if options.include_header {
                            html! {
                                <input
                                    style="display:block; width:100%; margin:2px 0 8px; padding:4px;"
                                    value={options.header_text.clone()}
                                    placeholder="Header text (defaults to the title)"
                                    oninput={link.callback(|e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        Msg::SetExportHeaderText(input.value())
                                    })}
                                />
                            }
                        } else {
                            html! {}
                        }
                    }

                    <label style="display:block;">
                        <input
                            type="checkbox"
                            checked={options.include_footer}
                            onchange={link.callback(|_| Msg::ToggleExportFooter)}
                        />
                        { " Page footer" }
                    </label>
                    {
                        if options.include_footer {
                            html! {
                                <input
                                    style="display:block; width:100%; margin:2px 0 8px; padding:4px;"
                                    value={options.footer_text.clone()}
                                    placeholder="Footer text (defaults to author and date)"
                                    oninput={link.callback(|e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        Msg::SetExportFooterText(input.value())
                                    })}
                                />
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div style="display:flex; gap:8px; justify-content:flex-end; margin-top:16px;">
                        <button onclick={link.callback(|_| Msg::CloseExportDialog)}>{ "Close" }</button>
                        <button onclick={link.callback(|_| Msg::ExportPdf)}>{ "Open print view" }</button>
                    </div>
                </div>
            </div>
        </TopSheet>
    }
}
