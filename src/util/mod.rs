use std::fmt::Display;
use std::sync::atomic::{AtomicI64, Ordering::Relaxed};

use crate::gui::util::RfdUtil;

pub mod img;

pub trait ResultExt<T> {
    fn unwrap_gui(self, title: &str) -> Option<T>;
}

impl<T,E> ResultExt<T> for Result<T,E> where E: Display {
    fn unwrap_gui(self, title: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                gui_error(title, e);
                None
            },
        }
    }
}

pub fn gui_error(title: &str, error: impl Display) {
    log::warn!("{}: {}", title, error);
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(format!("{}", error))
        .set_buttons(rfd::MessageButtons::Ok)
        .try_set_parent()
        .show();
}

static OP_GEN_EVO: AtomicI64 = AtomicI64::new(64);

pub fn next_op_gen_evo() -> u64 {
    let next = OP_GEN_EVO.fetch_add(1, Relaxed);
    if next > 0 {
        next as u64
    } else {
        panic!("OpEvo Overflow");
    }
}
