use common::export::html::PdfTheme;
use common::import::json::MergeStrategy;
use common::model::{WriteUp, WriteUpSection};
use common::store::Action;

use crate::ai::{AiError, AiProvider};

use super::state::ScreenshotTarget;

pub enum Msg {
    /// Run an action through the reducer and schedule a draft save if it
    /// dirtied the document.
    Apply(Action),
    /// Debounce timer fired; the payload is its ticket.
    FlushDraft(u64),

    // import
    OpenImportPicker,
    ImportFileSelected(web_sys::File),
    /// Whole-document JSON backup parsed; asks for confirmation before
    /// replacing the current document.
    ImportedDocumentReady(Box<WriteUp>),
    /// Sections parsed from a file; opens the merge dialog.
    ImportedSectionsReady {
        origin: String,
        sections: Vec<WriteUpSection>,
    },
    ImportFailed(String),
    MergeChosen(MergeStrategy),
    MergeCancelled,

    // images
    OpenScreenshotPicker(ScreenshotTarget),
    ScreenshotFileSelected(web_sys::File),
    ScreenshotRead { name: String, data_url: String },

    // export
    OpenExportDialog,
    CloseExportDialog,
    SetExportTheme(PdfTheme),
    ToggleExportHeader,
    ToggleExportFooter,
    SetExportHeaderText(String),
    SetExportFooterText(String),
    ExportMarkdown,
    ExportJson,
    ExportPdf,

    // AI assist
    OpenAiDialog(String),
    CloseAiDialog,
    SetAiProvider(AiProvider),
    SetAiApiKey(String),
    SetAiPrompt(String),
    RunAi,
    AiFinished {
        section_id: String,
        result: Result<String, AiError>,
    },

    // destructive actions behind a confirm()
    DeleteSectionRequested(String),
    ResetRequested,
}
