use std::path::PathBuf;

use crate::util::img::may_be_image;
use crate::util::ResultExt;

use super::init::SharedApp;
use super::window_states::tileset::{name_of_path, tileset_from_images};

impl SharedApp {
    /// Dropped images become one new tile set
    pub fn handle_filedrop(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone() );

        let images: Vec<PathBuf> = dropped.into_iter()
            .filter_map(|file| file.path )
            .filter(|path| may_be_image(path) )
            .collect();

        let Some(first) = images.first() else {return};

        let name = name_of_path(first);
        if let Some(ts) = tileset_from_images(name, &images).unwrap_gui("Failed to load dropped images") {
            self.tilesets.insert(ts);
        }
        ctx.request_repaint();
    }
}
