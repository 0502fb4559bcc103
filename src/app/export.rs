//! Export operations: clipboard copy and file download of the session JSON

use native_dialog::FileDialog;

use super::state::AppResult;
use super::{App, Modal};
use crate::session::codec;

impl App {
    /// Copy the exported JSON (the modal's text) to the clipboard.
    pub fn copy_json(&mut self) -> AppResult {
        let Modal::Json(modal) = &self.view.modal else {
            return AppResult::Ok;
        };
        let text = modal.text.clone();
        if let Some(clipboard) = &mut self.clipboard {
            if clipboard.set_text(text).is_ok() {
                return self.show_notice("JSON data copied to clipboard.".to_string());
            }
        }
        AppResult::Ok
    }

    /// Save the exported JSON via the native dialog, defaulting to the
    /// user's download directory and a sortable timestamped filename.
    pub fn download_json(&mut self) -> AppResult {
        let Modal::Json(modal) = &self.view.modal else {
            return AppResult::Ok;
        };
        let text = modal.text.clone();

        let filename = codec::export_filename();
        let downloads = dirs::download_dir();
        let dialog = FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_filename(&filename);
        let dialog = match &downloads {
            Some(dir) => dialog.set_location(dir),
            None => dialog,
        };

        match dialog.show_save_single_file() {
            Ok(Some(path)) => match std::fs::write(&path, text) {
                Ok(()) => self.show_notice(format!("Saved {}", path.display())),
                Err(err) => self.show_notice(format!("Could not save file: {}", err)),
            },
            _ => AppResult::Ok,
        }
    }
}
