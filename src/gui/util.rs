use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use super::init::EFRAME_FRAME;

/// Parent native dialogs to the eframe window, if called from within a frame
pub trait RfdUtil: Sized {
    fn set_parent_to<W: HasWindowHandle + HasDisplayHandle>(self, parent: &W) -> Self;

    fn try_set_parent(self) -> Self {
        if EFRAME_FRAME.is_set() {
            EFRAME_FRAME.with(|frame| self.set_parent_to(&*frame) )
        } else {
            self
        }
    }
}

impl RfdUtil for rfd::FileDialog {
    fn set_parent_to<W: HasWindowHandle + HasDisplayHandle>(self, parent: &W) -> Self {
        self.set_parent(parent)
    }
}

impl RfdUtil for rfd::MessageDialog {
    fn set_parent_to<W: HasWindowHandle + HasDisplayHandle>(self, parent: &W) -> Self {
        self.set_parent(parent)
    }
}
