//! State store for the write-up editor.
//!
//! Single source of truth for the in-memory document, the active-section
//! pointer and the current view, following a reducer model: every state
//! transition is the pure function [`reduce`] applied to an [`Action`].
//! The UI layer owns a `WriteUpState` and replaces it wholesale with the
//! reducer's result; the persistence adapter watches the `is_dirty` flag.
//!
//! Contract
//! - The reducer never panics: unknown section ids are silent no-ops and
//!   malformed sections are normalized through `WriteUpSection::sanitized`.
//! - Every action except `SetActiveSection`, `SetView` and `SetDirty`
//!   marks the document dirty (pending persistence).
//! - The returned state is always a fresh value; callers may compare
//!   against the previous one for change detection.

use crate::catalog;
use crate::model::{
    AppView, Difficulty, OperatingSystem, Screenshot, SectionType, WriteUp, WriteUpSection,
};

/// Full editor state: the document plus UI pointers.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteUpState {
    pub write_up: WriteUp,
    pub current_view: AppView,
    /// Section currently open in the single-section editor pane.
    pub active_section_id: Option<String>,
    /// Unsaved changes pending persistence.
    pub is_dirty: bool,
}

impl WriteUpState {
    pub fn new(today: &str) -> Self {
        Self {
            write_up: catalog::default_write_up(today),
            current_view: AppView::Editor,
            active_section_id: None,
            is_dirty: false,
        }
    }

    pub fn active_section(&self) -> Option<&WriteUpSection> {
        self.active_section_id
            .as_deref()
            .and_then(|id| self.write_up.section(id))
    }
}

/// Partial update of the document's general metadata. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralInfoPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub os: Option<OperatingSystem>,
    pub tags: Option<Vec<String>>,
}

/// Partial update of one section. `None` fields are left untouched.
/// Applying any patch commits a template section (clears `is_template`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub section_type: Option<SectionType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub flag_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole document (import / restore). The payload is
    /// expected to have passed the import sanitization boundary.
    LoadWriteUp(WriteUp),
    UpdateGeneralInfo(GeneralInfoPatch),
    /// Append a new committed section built from the type's default
    /// template and make it active.
    AddSection {
        section_type: SectionType,
        title: Option<String>,
    },
    /// Append a fully-formed section (file import); it gets a fresh id and
    /// is committed.
    AddPrebuiltSection(WriteUpSection),
    /// Bulk import: fresh ids, all committed, first one becomes active.
    AddImportedSections(Vec<WriteUpSection>),
    UpdateSection {
        id: String,
        patch: SectionPatch,
    },
    DeleteSection(String),
    /// Replace the sections array with a caller-provided ordering. The
    /// caller is responsible for preserving set membership.
    ReorderSections(Vec<WriteUpSection>),
    AddScreenshot {
        section_id: String,
        screenshot: Screenshot,
    },
    DeleteScreenshot {
        section_id: String,
        screenshot_id: String,
    },
    SetMachineImage(Option<Screenshot>),
    SetActiveSection(Option<String>),
    SetView(AppView),
    /// Replace everything with a fresh default document. The payload is
    /// today's date for the new document.
    ResetWriteUp {
        today: String,
    },
    /// Acknowledgement from the persistence adapter; never set directly by
    /// UI code.
    SetDirty(bool),
}

/// First non-template section if one exists, else the first section, else
/// none. Used wherever the active pointer must be (re)assigned.
fn pick_active(sections: &[WriteUpSection]) -> Option<String> {
    sections
        .iter()
        .find(|s| !s.is_template)
        .or_else(|| sections.first())
        .map(|s| s.id.clone())
}

pub fn reduce(state: &WriteUpState, action: Action) -> WriteUpState {
    // Most actions are content changes; navigation and the dirty
    // acknowledgement override this below.
    let mut next = state.clone();
    next.is_dirty = true;

    match action {
        Action::LoadWriteUp(write_up) => {
            let mut write_up = write_up;
            write_up.sections = write_up
                .sections
                .into_iter()
                .map(WriteUpSection::sanitized)
                .collect();
            next.active_section_id = pick_active(&write_up.sections);
            next.write_up = write_up;
        }
        Action::UpdateGeneralInfo(patch) => {
            let wu = &mut next.write_up;
            if let Some(title) = patch.title {
                wu.title = title;
            }
            if let Some(author) = patch.author {
                wu.author = author;
            }
            if let Some(date) = patch.date {
                wu.date = date;
            }
            if let Some(difficulty) = patch.difficulty {
                wu.difficulty = difficulty;
            }
            if let Some(os) = patch.os {
                wu.os = os;
            }
            if let Some(tags) = patch.tags {
                wu.tags = tags;
            }
        }
        Action::AddSection {
            section_type,
            title,
        } => {
            let section = catalog::default_section(section_type, title);
            next.active_section_id = Some(section.id.clone());
            next.write_up.sections.push(section);
        }
        Action::AddPrebuiltSection(section) => {
            let mut section = section.sanitized();
            section.id = uuid::Uuid::new_v4().to_string();
            section.is_template = false;
            next.active_section_id = Some(section.id.clone());
            next.write_up.sections.push(section);
        }
        Action::AddImportedSections(sections) => {
            let imported: Vec<WriteUpSection> = sections
                .into_iter()
                .map(|s| {
                    let mut s = s.sanitized();
                    s.id = uuid::Uuid::new_v4().to_string();
                    s.is_template = false;
                    s
                })
                .collect();
            if let Some(first) = imported.first() {
                next.active_section_id = Some(first.id.clone());
            }
            next.write_up.sections.extend(imported);
        }
        Action::UpdateSection { id, patch } => {
            if let Some(section) = next.write_up.sections.iter_mut().find(|s| s.id == id) {
                if let Some(section_type) = patch.section_type {
                    section.section_type = section_type;
                }
                if let Some(title) = patch.title {
                    section.title = title;
                }
                if let Some(content) = patch.content {
                    section.content = content;
                }
                if let Some(answer) = patch.answer {
                    section.answer = Some(answer);
                }
                if let Some(flag_value) = patch.flag_value {
                    section.flag_value = Some(flag_value);
                }
                // Any edit commits a template section.
                section.is_template = false;
            }
        }
        Action::DeleteSection(id) => {
            next.write_up.sections.retain(|s| s.id != id);
            if state.active_section_id.as_deref() == Some(id.as_str()) {
                next.active_section_id = pick_active(&next.write_up.sections);
            }
        }
        Action::ReorderSections(sections) => {
            next.write_up.sections = sections
                .into_iter()
                .map(WriteUpSection::sanitized)
                .collect();
        }
        Action::AddScreenshot {
            section_id,
            screenshot,
        } => {
            if let Some(section) = next
                .write_up
                .sections
                .iter_mut()
                .find(|s| s.id == section_id)
            {
                section.screenshots.push(screenshot);
                section.is_template = false;
            }
        }
        Action::DeleteScreenshot {
            section_id,
            screenshot_id,
        } => {
            if let Some(section) = next
                .write_up
                .sections
                .iter_mut()
                .find(|s| s.id == section_id)
            {
                section.screenshots.retain(|sc| sc.id != screenshot_id);
                section.is_template = false;
            }
        }
        Action::SetMachineImage(screenshot) => {
            next.write_up.machine_image = screenshot;
        }
        Action::SetActiveSection(id) => {
            // Navigation is not a content change.
            next.active_section_id = id;
            next.is_dirty = state.is_dirty;
        }
        Action::SetView(view) => {
            next.current_view = view;
            next.is_dirty = state.is_dirty;
        }
        Action::ResetWriteUp { today } => {
            next.write_up = catalog::default_write_up(&today);
            next.current_view = AppView::Editor;
            next.active_section_id = None;
        }
        Action::SetDirty(dirty) => {
            next.is_dirty = dirty;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> WriteUpState {
        WriteUpState::new("2025-06-01")
    }

    fn shot(name: &str) -> Screenshot {
        Screenshot::new(name, "data:image/png;base64,AAAA")
    }

    #[test]
    fn update_section_commits_only_that_template() {
        let state = fresh();
        let first_id = state.write_up.sections[0].id.clone();
        let next = reduce(
            &state,
            Action::UpdateSection {
                id: first_id.clone(),
                patch: SectionPatch {
                    content: Some("x".into()),
                    ..Default::default()
                },
            },
        );
        let first = next.write_up.section(&first_id).unwrap();
        assert!(!first.is_template);
        assert_eq!(first.content, "x");
        assert_eq!(
            next.write_up.sections.iter().filter(|s| s.is_template).count(),
            7
        );
        // The other seven are untouched.
        for (a, b) in state.write_up.sections.iter().zip(&next.write_up.sections) {
            if a.id != first_id {
                assert_eq!(a, b);
            }
        }
        assert!(next.is_dirty);
    }

    #[test]
    fn update_unknown_section_is_a_noop_on_sections() {
        let state = fresh();
        let next = reduce(
            &state,
            Action::UpdateSection {
                id: "no-such-id".into(),
                patch: SectionPatch {
                    title: Some("t".into()),
                    ..Default::default()
                },
            },
        );
        assert_eq!(state.write_up.sections, next.write_up.sections);
    }

    #[test]
    fn add_section_appends_committed_and_activates() {
        let state = fresh();
        let next = reduce(
            &state,
            Action::AddSection {
                section_type: SectionType::Flag,
                title: None,
            },
        );
        let added = next.write_up.sections.last().unwrap();
        assert_eq!(added.section_type, SectionType::Flag);
        assert!(!added.is_template);
        assert_eq!(next.active_section_id.as_deref(), Some(added.id.as_str()));
        assert_eq!(next.write_up.sections.len(), 9);
    }

    #[test]
    fn imported_sections_get_fresh_ids_and_commit() {
        let state = fresh();
        let stale_id = state.write_up.sections[0].id.clone();
        let mut incoming = state.write_up.sections[0].clone();
        incoming.id = stale_id.clone();
        incoming.is_template = true;
        let next = reduce(&state, Action::AddImportedSections(vec![incoming]));
        let added = next.write_up.sections.last().unwrap();
        assert_ne!(added.id, stale_id);
        assert!(!added.is_template);
        assert_eq!(next.active_section_id.as_deref(), Some(added.id.as_str()));
    }

    #[test]
    fn ids_stay_unique_across_action_sequences() {
        let mut state = fresh();
        let duplicate = state.write_up.sections[0].clone();
        for action in [
            Action::AddPrebuiltSection(duplicate.clone()),
            Action::AddImportedSections(vec![duplicate.clone(), duplicate]),
            Action::AddSection {
                section_type: SectionType::Notes,
                title: Some("notes".into()),
            },
        ] {
            state = reduce(&state, action);
        }
        let ids: Vec<&str> = state.write_up.sections.iter().map(|s| s.id.as_str()).collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn delete_active_prefers_non_template_survivor() {
        let mut state = fresh();
        state = reduce(
            &state,
            Action::AddSection {
                section_type: SectionType::Step,
                title: Some("mine".into()),
            },
        );
        let mine = state.active_section_id.clone().unwrap();
        state = reduce(
            &state,
            Action::AddSection {
                section_type: SectionType::Step,
                title: Some("mine 2".into()),
            },
        );
        let active = state.active_section_id.clone().unwrap();
        let next = reduce(&state, Action::DeleteSection(active));
        // "mine" is the first non-template section left.
        assert_eq!(next.active_section_id.as_deref(), Some(mine.as_str()));
    }

    #[test]
    fn delete_active_falls_back_to_first_template_then_none() {
        let mut state = fresh();
        let first_template = state.write_up.sections[0].id.clone();
        state.active_section_id = Some(first_template.clone());
        let next = reduce(&state, Action::DeleteSection(first_template));
        // Only templates remain; the first one becomes active.
        assert_eq!(
            next.active_section_id.as_deref(),
            Some(next.write_up.sections[0].id.as_str())
        );

        // Drain everything.
        let mut state = next;
        while let Some(first) = state.write_up.sections.first().map(|s| s.id.clone()) {
            state.active_section_id = Some(first.clone());
            state = reduce(&state, Action::DeleteSection(first));
        }
        assert_eq!(state.active_section_id, None);
    }

    #[test]
    fn delete_inactive_keeps_active_pointer() {
        let mut state = fresh();
        state = reduce(
            &state,
            Action::AddSection {
                section_type: SectionType::Step,
                title: None,
            },
        );
        let active = state.active_section_id.clone();
        let other = state.write_up.sections[0].id.clone();
        let next = reduce(&state, Action::DeleteSection(other));
        assert_eq!(next.active_section_id, active);
    }

    #[test]
    fn navigation_never_dirties_or_mutates_sections() {
        let state = fresh();
        let id = state.write_up.sections[2].id.clone();
        let mut next = reduce(&state, Action::SetActiveSection(Some(id.clone())));
        next = reduce(&next, Action::SetActiveSection(Some(id)));
        next = reduce(&next, Action::SetView(AppView::Preview));
        next = reduce(&next, Action::SetView(AppView::Preview));
        assert!(!next.is_dirty);
        assert_eq!(next.write_up.sections, state.write_up.sections);
    }

    #[test]
    fn screenshot_mutations_commit_the_section() {
        let state = fresh();
        let id = state.write_up.sections[0].id.clone();
        let sc = shot("proof.png");
        let next = reduce(
            &state,
            Action::AddScreenshot {
                section_id: id.clone(),
                screenshot: sc,
            },
        );
        assert!(!next.write_up.section(&id).unwrap().is_template);
        assert_eq!(next.write_up.section(&id).unwrap().screenshots.len(), 1);

        // Deleting down to zero still counts as a commit (consistent
        // commit-on-any-mutation policy).
        let mut state = fresh();
        state.write_up.sections[0].screenshots.push(shot("a.png"));
        let only = state.write_up.sections[0].screenshots[0].id.clone();
        let id = state.write_up.sections[0].id.clone();
        let next = reduce(
            &state,
            Action::DeleteScreenshot {
                section_id: id.clone(),
                screenshot_id: only,
            },
        );
        let section = next.write_up.section(&id).unwrap();
        assert!(section.screenshots.is_empty());
        assert!(!section.is_template);
    }

    #[test]
    fn load_selects_first_non_template_and_round_trips() {
        let mut doc = crate::catalog::default_write_up("2025-06-01");
        doc.sections[3].is_template = false;
        let expected = doc.sections.clone();
        let state = fresh();
        let next = reduce(&state, Action::LoadWriteUp(doc.clone()));
        assert_eq!(
            next.active_section_id.as_deref(),
            Some(doc.sections[3].id.as_str())
        );
        assert!(next.is_dirty);

        // Whole-document load keeps section ids (round-trip property).
        let json = serde_json::to_string(&next.write_up).unwrap();
        let reloaded: WriteUp = serde_json::from_str(&json).unwrap();
        let again = reduce(&next, Action::LoadWriteUp(reloaded));
        assert_eq!(again.write_up.sections, expected);
    }

    #[test]
    fn reorder_replaces_order_and_marks_dirty() {
        let state = fresh();
        let mut reversed = state.write_up.sections.clone();
        reversed.reverse();
        let next = reduce(&state, Action::ReorderSections(reversed.clone()));
        assert_eq!(next.write_up.sections, reversed);
        assert!(next.is_dirty);
    }

    #[test]
    fn reset_restores_defaults_and_clears_active() {
        let mut state = fresh();
        state = reduce(
            &state,
            Action::AddSection {
                section_type: SectionType::Step,
                title: None,
            },
        );
        let next = reduce(
            &state,
            Action::ResetWriteUp {
                today: "2025-06-02".into(),
            },
        );
        assert_eq!(next.write_up.sections.len(), 8);
        assert!(next.write_up.sections.iter().all(|s| s.is_template));
        assert_eq!(next.active_section_id, None);
        assert_eq!(next.write_up.date, "2025-06-02");
        assert!(next.is_dirty);
    }

    #[test]
    fn set_dirty_acknowledges_a_save() {
        let mut state = fresh();
        state = reduce(
            &state,
            Action::UpdateGeneralInfo(GeneralInfoPatch {
                title: Some("HTB Cap".into()),
                ..Default::default()
            }),
        );
        assert!(state.is_dirty);
        let next = reduce(&state, Action::SetDirty(false));
        assert!(!next.is_dirty);
        assert_eq!(next.write_up.title, "HTB Cap");
    }

    #[test]
    fn general_info_patch_merges_shallowly() {
        let state = fresh();
        let next = reduce(
            &state,
            Action::UpdateGeneralInfo(GeneralInfoPatch {
                author: Some("0xdf".into()),
                difficulty: Some(Difficulty::Hard),
                tags: Some(vec!["linux".into(), "sqli".into()]),
                ..Default::default()
            }),
        );
        assert_eq!(next.write_up.author, "0xdf");
        assert_eq!(next.write_up.difficulty, Difficulty::Hard);
        assert_eq!(next.write_up.tags, vec!["linux", "sqli"]);
        // Untouched fields survive.
        assert_eq!(next.write_up.date, state.write_up.date);
        assert_eq!(next.write_up.title, state.write_up.title);
    }

    #[test]
    fn sanitized_assigns_missing_ids_on_load() {
        let mut doc = crate::catalog::default_write_up("2025-06-01");
        doc.sections[0].id = String::new();
        let next = reduce(&fresh(), Action::LoadWriteUp(doc));
        assert!(!next.write_up.sections[0].id.is_empty());
    }
}
