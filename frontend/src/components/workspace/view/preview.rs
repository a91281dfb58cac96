//! Full-document preview. Unlike the export pipeline this is lenient:
//! missing metadata renders as placeholders instead of failing, so the
//! user can flip to the preview at any point while writing.

use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use common::export::html::markdown_to_html;
use common::model::SectionType;

use crate::components::workspace::state::WorkspaceComponent;

pub fn build_preview(component: &WorkspaceComponent) -> Html {
    let write_up = &component.state.write_up;
    let title = if write_up.title.trim().is_empty() {
        "(untitled write-up)"
    } else {
        write_up.title.as_str()
    };

    html! {
        <div class="markdown-preview" style="max-width:52em; margin:0 auto; padding:16px;">
            <h1>{ title }</h1>
            <ul class="meta">
                <li><b>{ "Author: " }</b>{ or_placeholder(&write_up.author) }</li>
                <li><b>{ "Date: " }</b>{ or_placeholder(&write_up.date) }</li>
                <li><b>{ "Difficulty: " }</b>{ write_up.difficulty.label() }</li>
                <li><b>{ "OS: " }</b>{ write_up.os.label() }</li>
                {
                    if write_up.tags.is_empty() {
                        html! {}
                    } else {
                        html! { <li><b>{ "Tags: " }</b>{ write_up.tags.join(", ") }</li> }
                    }
                }
            </ul>
            {
                match &write_up.machine_image {
                    Some(image) => html! {
                        <img
                            src={image.data_url.clone()}
                            alt={image.name.clone()}
                            style="max-width:240px; border-radius:6px;"
                        />
                    },
                    None => html! {},
                }
            }
            <hr />
            {
                if write_up.user_sections().next().is_none() {
                    html! { <p style="color:#888;">{ "No committed sections yet." }</p> }
                } else {
                    write_up.user_sections().enumerate().map(|(index, section)| {
                        html! {
                            <section style="margin-bottom:1.5em;">
                                <h2>{ format!("{}. {}", index + 1, section.title) }</h2>
                                { build_callout(section) }
                                { render_markdown(&section.content) }
                                {
                                    section.screenshots.iter().map(|screenshot| html! {
                                        <figure>
                                            <img
                                                src={screenshot.data_url.clone()}
                                                alt={screenshot.name.clone()}
                                                style="max-width:100%;"
                                            />
                                            <figcaption>{ screenshot.name.clone() }</figcaption>
                                        </figure>
                                    }).collect::<Html>()
                                }
                            </section>
                        }
                    }).collect::<Html>()
                }
            }
        </div>
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

fn build_callout(section: &common::model::WriteUpSection) -> Html {
    let callout = match section.section_type {
        SectionType::Question => section
            .answer
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .map(|a| ("Answer", a.to_string())),
        SectionType::Flag => section
            .flag_value
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(|f| ("Flag", f.to_string())),
        _ => None,
    };
    match callout {
        Some((label, value)) => html! {
            <blockquote style="border-left:3px solid #888; padding-left:8px;">
                <b>{ format!("{label}: ") }</b><code>{ value }</code>
            </blockquote>
        },
        None => html! {},
    }
}

// Same Markdown pipeline as the HTML export; raw HTML in the source is
// demoted to escaped text there, so the unchecked injection only carries
// markup the renderer itself produced.
fn render_markdown(content: &str) -> Html {
    Html::from_html_unchecked(AttrValue::from(markdown_to_html(content)))
}
