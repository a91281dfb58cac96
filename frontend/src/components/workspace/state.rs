//! Component state for the write-up workspace.
//!
//! The document itself lives in `common::store::WriteUpState` and only
//! changes through the pure reducer; everything else here is UI plumbing
//! (dialog refs, pending import payloads, the in-flight AI request).

use yew::prelude::*;

use common::export::html::PdfExportOptions;
use common::model::WriteUpSection;
use common::store::WriteUpState;

use crate::ai::AiProvider;
use crate::storage::{self, SaveDebounce};

/// Where the next picked image file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenshotTarget {
    Section(String),
    MachineImage,
}

/// State of the AI assist dialog. The key and provider choice are restored
/// from localStorage on startup; the prompt is reseeded every time the
/// dialog opens.
pub struct AiAssist {
    pub provider: AiProvider,
    pub api_key: String,
    pub prompt: String,
    /// One request in flight at a time; disables the generate button.
    pub busy: bool,
    /// Section the response will be applied to.
    pub target_section: Option<String>,
}

impl AiAssist {
    fn restore() -> Self {
        Self {
            provider: storage::load_setting(storage::PROVIDER_KEY)
                .map(|id| AiProvider::from_id(&id))
                .unwrap_or(AiProvider::OpenAi),
            api_key: storage::load_setting(storage::API_KEY_KEY).unwrap_or_default(),
            prompt: String::new(),
            busy: false,
            target_section: None,
        }
    }
}

pub struct WorkspaceComponent {
    /// Reducer-owned document state.
    pub state: WriteUpState,
    /// Debounce ticket counter for the localStorage mirror.
    pub save: SaveDebounce,
    /// Guard for the one-time draft restore on first render.
    pub loaded: bool,

    pub export_options: PdfExportOptions,

    pub export_dialog_ref: NodeRef,
    pub merge_dialog_ref: NodeRef,
    pub ai_dialog_ref: NodeRef,
    pub import_input_ref: NodeRef,
    pub screenshot_input_ref: NodeRef,

    /// Sections parsed from a file, waiting on the user's merge choice.
    pub pending_sections: Vec<WriteUpSection>,
    /// File name shown in the merge dialog.
    pub pending_origin: String,
    /// Destination of the next picked image file.
    pub screenshot_target: Option<ScreenshotTarget>,

    pub ai: AiAssist,
}

impl WorkspaceComponent {
    pub fn new(today: &str) -> Self {
        Self {
            state: WriteUpState::new(today),
            save: SaveDebounce::default(),
            loaded: false,
            export_options: PdfExportOptions::default(),
            export_dialog_ref: Default::default(),
            merge_dialog_ref: Default::default(),
            ai_dialog_ref: Default::default(),
            import_input_ref: Default::default(),
            screenshot_input_ref: Default::default(),
            pending_sections: Vec::new(),
            pending_origin: String::new(),
            screenshot_target: None,
            ai: AiAssist::restore(),
        }
    }
}
