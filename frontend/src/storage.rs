//! localStorage adapter: the working draft plus a couple of persisted UI
//! settings. The draft is stored as the raw backup JSON and re-read
//! through the lenient import boundary, so a hand-edited or stale entry
//! degrades to defaults instead of crashing the app.

use gloo_storage::{LocalStorage, Storage};

use common::export::json_backup;
use common::import::ImportError;
use common::import::json::parse_document;
use common::model::WriteUp;

pub const DRAFT_KEY: &str = "ctf_writeup_builder_draft";
pub const API_KEY_KEY: &str = "ctf_writeup_builder_api_key";
pub const PROVIDER_KEY: &str = "ctf_writeup_builder_provider";

/// Generation counter behind the trailing save debounce. Every
/// dirty-marking change bumps the generation and arms a fresh timer; a
/// timer that wakes up to find a newer generation does nothing, so a burst
/// of edits produces exactly one write containing the final state.
#[derive(Default)]
pub struct SaveDebounce {
    generation: u64,
}

impl SaveDebounce {
    /// Invalidates any armed timer and returns the ticket for the new one.
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// Decodes a stored draft entry. `None` means no entry existed; `Some(Err)`
/// means the entry is unreadable and must be discarded.
fn decode_draft(raw: Option<String>, today: &str) -> Option<Result<WriteUp, ImportError>> {
    raw.map(|raw| parse_document(&raw, today))
}

/// Reads the saved draft, if any. A corrupt entry is removed so the next
/// start is clean.
pub fn load_draft(today: &str) -> Option<WriteUp> {
    let raw = LocalStorage::raw().get_item(DRAFT_KEY).ok().flatten();
    match decode_draft(raw, today)? {
        Ok(write_up) => Some(write_up),
        Err(err) => {
            gloo_console::warn!(format!("discarding unreadable draft: {err}"));
            LocalStorage::raw().remove_item(DRAFT_KEY).ok();
            None
        }
    }
}

pub fn save_draft(write_up: &WriteUp) -> bool {
    LocalStorage::raw()
        .set_item(DRAFT_KEY, &json_backup(write_up))
        .is_ok()
}

pub fn clear_draft() {
    LocalStorage::raw().remove_item(DRAFT_KEY).ok();
}

pub fn load_setting(key: &str) -> Option<String> {
    LocalStorage::get::<String>(key).ok()
}

pub fn save_setting(key: &str, value: &str) {
    LocalStorage::set(key, value.to_string()).ok();
}

#[cfg(test)]
mod tests {
    use super::{decode_draft, SaveDebounce};
    use common::export::json_backup;
    use common::model::WriteUp;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut debounce = SaveDebounce::default();
        let first = debounce.schedule();
        let second = debounce.schedule();
        assert!(!debounce.is_current(first));
        assert!(debounce.is_current(second));
    }

    #[test]
    fn a_burst_of_edits_leaves_one_live_ticket() {
        let mut debounce = SaveDebounce::default();
        let tickets: Vec<u64> = (0..10).map(|_| debounce.schedule()).collect();
        let live: Vec<&u64> = tickets.iter().filter(|t| debounce.is_current(**t)).collect();
        assert_eq!(live, vec![tickets.last().unwrap()]);
    }

    #[test]
    fn a_corrupt_entry_is_marked_for_discard() {
        let outcome = decode_draft(Some("{not json".into()), "2025-06-01");
        assert!(matches!(outcome, Some(Err(_))));
    }

    #[test]
    fn a_missing_entry_is_not_discarded() {
        assert!(decode_draft(None, "2025-06-01").is_none());
    }

    #[test]
    fn a_saved_draft_round_trips() {
        let wu = common::catalog::default_write_up("2025-06-01");
        let outcome = decode_draft(Some(json_backup(&wu)), "2025-06-01");
        let restored: WriteUp = outcome.unwrap().unwrap();
        assert_eq!(restored.sections.len(), wu.sections.len());
        assert_eq!(restored.date, "2025-06-01");
    }
}
