use std::path::{Path, PathBuf};

use crate::util::img::IMAGE_EXTENSIONS;

use super::util::RfdUtil;

/// Modal interaction with the user outside of the dialog itself
pub trait Prompter {
    /// Multi-select image files. `None` if cancelled.
    fn pick_images(&mut self, title: &str) -> Option<Vec<PathBuf>>;
    /// Single image file. `None` if cancelled.
    fn pick_image(&mut self, title: &str) -> Option<PathBuf>;
    fn confirm(&mut self, title: &str, text: &str) -> bool;
    fn error(&mut self, title: &str, text: &str);
}

/// Native dialogs
#[derive(Default)]
pub struct RfdPrompter {
    pub last_dir: Option<PathBuf>,
}

impl RfdPrompter {
    pub fn new(last_dir: Option<PathBuf>) -> Self {
        Self { last_dir }
    }

    fn file_dialog(&self, title: &str) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Images", IMAGE_EXTENSIONS)
            .try_set_parent();
        if let Some(dir) = self.last_dir.as_ref().filter(|d| d.is_dir() ) {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    fn remember_dir(&mut self, file: &Path) {
        if let Some(parent) = file.parent() {
            self.last_dir = Some(parent.to_owned());
        }
    }
}

impl Prompter for RfdPrompter {
    fn pick_images(&mut self, title: &str) -> Option<Vec<PathBuf>> {
        let files = self.file_dialog(title).pick_files()?;
        if let Some(first) = files.first() {
            self.remember_dir(first);
        }
        Some(files)
    }

    fn pick_image(&mut self, title: &str) -> Option<PathBuf> {
        let file = self.file_dialog(title).pick_file()?;
        self.remember_dir(&file);
        Some(file)
    }

    fn confirm(&mut self, title: &str, text: &str) -> bool {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(text)
            .set_buttons(rfd::MessageButtons::YesNo)
            .try_set_parent()
            .show();
        matches!(result, rfd::MessageDialogResult::Yes)
    }

    fn error(&mut self, title: &str, text: &str) {
        crate::util::gui_error(title, text);
    }
}
