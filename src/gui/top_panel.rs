use crate::tile::TileSet;
use crate::util::ResultExt;

use super::init::SharedApp;
use super::prompt::Prompter;
use super::window_states::tileset::{name_of_path, tileset_from_images};

pub struct TopPanel {
    tile_w: u32,
    tile_h: u32,
}

impl TopPanel {
    pub fn new([tile_w,tile_h]: [u32;2]) -> Self {
        Self {
            tile_w,
            tile_h,
        }
    }
}

pub fn top_panel_ui(state: &mut SharedApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("New tile set from images…").clicked() {
            new_tileset_from_images(state);
        }
        ui.separator();
        if ui.button("Import tile bitmap with tile size:").clicked() {
            import_tile_bitmap(state);
        }
        ui.add(egui::DragValue::new(&mut state.top_panel.tile_w).speed(1).clamp_range(1..=1024));
        ui.label("x");
        ui.add(egui::DragValue::new(&mut state.top_panel.tile_h).speed(1).clamp_range(1..=1024));
    });
}

fn new_tileset_from_images(state: &mut SharedApp) {
    let Some(paths) = state.sam.prompter.pick_images("New tile set from images") else {return};
    let Some(first) = paths.first() else {return};
    let name = name_of_path(first);
    let Some(ts) = tileset_from_images(name, &paths).unwrap_gui("Failed to create tile set") else {return};
    state.tilesets.insert(ts);
}

fn import_tile_bitmap(state: &mut SharedApp) {
    let Some(path) = state.sam.prompter.pick_image("Import tile bitmap") else {return};
    let tile_size = [state.top_panel.tile_w, state.top_panel.tile_h];
    let Some(ts) = TileSet::from_bitmap(name_of_path(&path), &path, tile_size).unwrap_gui("Failed to import tile bitmap") else {return};
    state.config.tile_size = tile_size;
    state.tilesets.insert(ts);
}
