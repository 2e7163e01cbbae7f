use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::gui::init::SharedApp;
use crate::gui::tile_dialog::TileDialog;
use crate::tile::{Tile, TileSet};
use crate::util::img::load_tile_image;
use crate::SRc;

pub struct Tilesets {
    pub open_tilesets: Vec<SRc<RefCell<TileSet>>>,
}

impl Tilesets {
    pub fn new() -> Self {
        Self {
            open_tilesets: Default::default(),
        }
    }

    pub fn insert(&mut self, tileset: TileSet) -> SRc<RefCell<TileSet>> {
        log::info!("Opened tile set '{}' with {} tiles", tileset.name(), tileset.total_tiles());
        let tileset = SRc::new(RefCell::new(tileset));
        self.open_tilesets.push(tileset.clone());
        tileset
    }
}

/// New internal tile set with one tile per image. Fails on the first undecodable image.
pub fn tileset_from_images(name: impl Into<String>, paths: &[PathBuf]) -> anyhow::Result<TileSet> {
    let mut tileset = TileSet::new(name);
    for path in paths {
        let image = load_tile_image(path)?;
        tileset.add_new_tile(Tile::new(image))
            .with_context(|| format!("Failed to add {}", path.display()) )?;
    }
    Ok(tileset)
}

/// Tile set name from a file name
pub fn name_of_path(path: &Path) -> String {
    path.file_stem()
        .map(|v| v.to_string_lossy().into_owned() )
        .unwrap_or_else(|| "Untitled".to_owned() )
}

pub fn tilesets_ui(state: &mut SharedApp, ui: &mut egui::Ui) {
    if state.tilesets.open_tilesets.is_empty() {
        ui.weak("No tile sets open. Create one from images or a tile bitmap, or drop images here.");
        return;
    }

    egui::Grid::new("open_tilesets_grid")
        .num_columns(4)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Name");
            ui.strong("Tiles");
            ui.strong("Kind");
            ui.end_row();

            for (index,tileset) in state.tilesets.open_tilesets.iter().enumerate() {
                let ts = tileset.borrow();
                ui.label(ts.name());
                ui.label(ts.total_tiles().to_string());
                ui.label(
                    if let Some(source) = ts.source() {
                        format!("external ({})", source.display())
                    } else if let Some(bmp) = ts.tilebmp_file() {
                        format!("tile bitmap ({})", bmp.display())
                    } else {
                        "internal".to_owned()
                    }
                );
                ui.horizontal(|ui| {
                    if ui.button("Edit…").clicked() {
                        let tileset = tileset.clone();
                        state.sam.mut_queue.push(Box::new(move |state: &mut SharedApp| state.open_tile_dialog(tileset) ));
                    }
                    if ui.button("Close").clicked() {
                        state.sam.mut_queue.push(Box::new(move |state: &mut SharedApp| {
                            let removed = state.tilesets.open_tilesets.remove(index);
                            log::info!("Closed tile set '{}'", removed.borrow().name());
                        }));
                    }
                });
                ui.end_row();
            }
        });
}

impl SharedApp {
    pub fn open_tile_dialog(&mut self, tileset: SRc<RefCell<TileSet>>) {
        log::info!("Editing tile set '{}'", tileset.borrow().name());
        self.dialog = Some(TileDialog::new(tileset).with_thumb_size(self.config.thumb_size));
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;

    #[test]
    fn builds_tileset_from_images() {
        let dir = std::env::temp_dir();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let path = dir.join(format!("tilesed_ws_{}_{}.png", std::process::id(), i));
                RgbaImage::new(4 + i, 4).save(&path).unwrap();
                path
            })
            .collect();

        let ts = tileset_from_images("imgs", &paths).unwrap();
        assert_eq!(ts.total_tiles(), 3);
        assert_eq!(ts.tile_at(2).unwrap().size(), [6, 4]);
        assert!(ts.is_editable());

        for p in &paths {
            std::fs::remove_file(p).unwrap();
        }
    }

    #[test]
    fn names_from_paths() {
        assert_eq!(name_of_path(Path::new("/a/grass.png")), "grass");
        assert_eq!(name_of_path(Path::new("/")), "Untitled");
    }
}
