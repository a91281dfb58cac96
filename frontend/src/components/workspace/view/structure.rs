//! Section list panel: navigation, ordering, deletion and the add-section
//! buttons. Template suggestions are rendered dimmed until committed by an
//! edit.

use yew::html::Scope;
use yew::prelude::*;

use common::model::SectionType;
use common::store::Action;

use crate::components::workspace::messages::Msg;
use crate::components::workspace::state::WorkspaceComponent;

pub fn build_structure(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>) -> Html {
    let sections = &component.state.write_up.sections;

    html! {
        <section class="structure" style="border:1px solid #ddd; border-radius:6px; padding:12px;">
            <h2 style="font-size:1rem; margin:0 0 8px;">{ "Sections" }</h2>
            <div>
                {
                    (0..sections.len()).map(|index| {
                        build_row(component, link, index)
                    }).collect::<Html>()
                }
            </div>
            <div style="display:flex; gap:6px; margin-top:10px; flex-wrap:wrap;">
                {
                    SectionType::ALL.iter().map(|section_type| {
                        let section_type = *section_type;
                        html! {
                            <button onclick={link.callback(move |_| Msg::Apply(Action::AddSection {
                                section_type,
                                title: None,
                            }))}>
                                { format!("+ {}", section_type.label()) }
                            </button>
                        }
                    }).collect::<Html>()
                }
            </div>
        </section>
    }
}

fn build_row(component: &WorkspaceComponent, link: &Scope<WorkspaceComponent>, index: usize) -> Html {
    let sections = &component.state.write_up.sections;
    let section = &sections[index];
    let id = section.id.clone();
    let active = component.state.active_section_id.as_deref() == Some(section.id.as_str());

    let row_style = format!(
        "display:flex; align-items:center; gap:6px; padding:6px; border-radius:4px; cursor:pointer; {} {}",
        if active { "background:#e3f2fd;" } else { "" },
        if section.is_template { "opacity:0.6;" } else { "" },
    );

    let title = if section.title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        section.title.clone()
    };

    html! {
        <div
            class={classes!("section-row", active.then_some("active"))}
            style={row_style}
            onclick={
                let id = id.clone();
                link.callback(move |_| Msg::Apply(Action::SetActiveSection(Some(id.clone()))))
            }
        >
            <span
                class="type-chip"
                style="font-size:0.7rem; padding:1px 6px; border:1px solid #bbb; border-radius:8px;"
            >
                { section.section_type.label() }
            </span>
            <span style="flex:1; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                { title }
            </span>
            {
                if section.is_template {
                    html! { <span style="font-size:0.7rem; color:#999;">{ "suggested" }</span> }
                } else {
                    html! {}
                }
            }
            { build_move_button(component, link, index, index.checked_sub(1), "▲") }
            { build_move_button(component, link, index, (index + 1 < sections.len()).then_some(index + 1), "▼") }
            <button
                title="Delete section"
                onclick={
                    let id = id.clone();
                    link.callback(move |e: MouseEvent| {
                        e.stop_propagation();
                        Msg::DeleteSectionRequested(id.clone())
                    })
                }
            >
                { "✕" }
            </button>
        </div>
    }
}

fn build_move_button(
    component: &WorkspaceComponent,
    link: &Scope<WorkspaceComponent>,
    from: usize,
    to: Option<usize>,
    glyph: &'static str,
) -> Html {
    let Some(to) = to else {
        return html! {};
    };
    let sections = component.state.write_up.sections.clone();
    html! {
        <button
            title="Move section"
            onclick={link.callback(move |e: MouseEvent| {
                e.stop_propagation();
                let mut reordered = sections.clone();
                reordered.swap(from, to);
                Msg::Apply(Action::ReorderSections(reordered))
            })}
        >
            { glyph }
        </button>
    }
}
