//! Modal editor for the tiles of one tile set.
//!
//! The dialog is driven by [`DialogIntent`]s. The egui side in [`ui`] only queues intents,
//! they are applied by [`TileDialog::dispatch`] after the frame was drawn.

use std::cell::RefCell;

use ahash::HashMap;

use crate::tile::{Tile, TileId, TileSet};
use crate::util::img::load_tile_image;
use crate::SRc;

use super::prompt::Prompter;
use super::properties::PropertiesTableModel;
use super::texture::TextureCell;

use self::list::{TileList, TileListRenderer};

pub mod list;
pub mod ui;

pub const DEFAULT_THUMB_SIZE: f32 = 32.;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DialogIntent {
    Select(Option<TileId>),
    Add,
    Duplicate,
    Delete,
    ChangeImage,
    Confirm,
}

/// Which controls accept input
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Controls {
    pub add: bool,
    pub delete: bool,
    pub change_image: bool,
    pub duplicate: bool,
    pub properties: bool,
}

impl Controls {
    pub fn compute(tileset: &TileSet, tile_selected: bool) -> Self {
        let editable = tileset.is_editable();
        Self {
            add: editable,
            delete: editable && tile_selected,
            change_image: editable && tile_selected,
            duplicate: editable && tile_selected,
            properties: editable && tile_selected,
        }
    }
}

pub struct TileDialog {
    title: String,
    tileset: SRc<RefCell<TileSet>>,
    current_tile: Option<TileId>,
    table: PropertiesTableModel,
    list: TileList,
    controls: Controls,
    open: bool,
    thumb_size: f32,
    pending: Vec<DialogIntent>,
    thumbnails: HashMap<TileId,TextureCell>,
}

impl TileDialog {
    pub fn new(tileset: SRc<RefCell<TileSet>>) -> Self {
        let mut dialog = Self {
            title: String::new(),
            tileset: tileset.clone(),
            current_tile: None,
            table: PropertiesTableModel::new(),
            list: TileList::default(),
            controls: Controls::default(),
            open: true,
            thumb_size: DEFAULT_THUMB_SIZE,
            pending: vec![],
            thumbnails: Default::default(),
        };
        dialog.set_tileset(tileset);
        dialog
    }

    pub fn with_thumb_size(mut self, size: f32) -> Self {
        self.thumb_size = size;
        self.query_tiles();
        self
    }

    /// Switch to another tile set. Pending edits of the current tile are written back first.
    pub fn set_tileset(&mut self, tileset: SRc<RefCell<TileSet>>) {
        self.flush_properties();
        self.tileset = tileset;
        self.title = format!("Edit Tileset '{}'", self.tileset.borrow().name());
        self.thumbnails.clear();
        self.current_tile = None;
        self.list.set_selected_index(None);
        self.query_tiles();
        self.set_current_tile(None);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tileset(&self) -> &SRc<RefCell<TileSet>> {
        &self.tileset
    }

    pub fn current_tile(&self) -> Option<TileId> {
        self.current_tile
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn list(&self) -> &TileList {
        &self.list
    }

    pub fn table(&self) -> &PropertiesTableModel {
        &self.table
    }

    /// One-shot request to scroll the selected row into view, cleared on read
    pub fn take_scroll_request(&mut self) -> bool {
        self.list.take_scroll_request()
    }

    /// In-table edits. Only written to the tile on selection change, duplicate and confirm.
    pub fn table_mut(&mut self) -> &mut PropertiesTableModel {
        &mut self.table
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Queue an intent to be applied by [`dispatch_pending`](Self::dispatch_pending)
    pub fn queue(&mut self, intent: DialogIntent) {
        self.pending.push(intent);
    }

    pub fn dispatch_pending(&mut self, prompter: &mut impl Prompter) {
        for intent in std::mem::take(&mut self.pending) {
            self.dispatch(intent, prompter);
        }
    }

    pub fn dispatch(&mut self, intent: DialogIntent, prompter: &mut impl Prompter) {
        if !self.open {
            log::debug!("Ignoring {:?} on closed dialog", intent);
            return;
        }
        match intent {
            DialogIntent::Select(tile) => self.set_current_tile(tile),
            DialogIntent::Add => self.add_tiles(prompter),
            DialogIntent::Duplicate => self.duplicate_tile(prompter),
            DialogIntent::Delete => self.delete_tile(prompter),
            DialogIntent::ChangeImage => self.change_image(prompter),
            DialogIntent::Confirm => self.confirm(),
        }
    }

    /// Rebuild the list from the tile set and reselect the current tile
    pub fn query_tiles(&mut self) {
        let tileset = self.tileset.borrow();
        self.list.set_list_data(&tileset);
        if let Some(tile) = self.current_tile.and_then(|id| tileset.tile(id) ) {
            let index = tile.gid() as usize - 1;
            self.list.set_selected_index(Some(index));
            self.list.ensure_index_is_visible();
        }
        self.list.set_renderer(TileListRenderer::for_tileset(&tileset, self.thumb_size));
        self.thumbnails.retain(|id,_| tileset.tile(*id).is_some() );
    }

    fn set_current_tile(&mut self, tile: Option<TileId>) {
        self.flush_properties();

        let tileset = self.tileset.borrow();
        self.current_tile = tile.filter(|&id| tileset.tile(id).is_some() );
        self.list.set_selected_index(self.current_tile.and_then(|id| tileset.position_of(id) ));
        drop(tileset);

        log::debug!("Selected tile {:?}", self.current_tile);

        self.update_tile_info();
        self.update_controls();
    }

    fn update_controls(&mut self) {
        self.controls = Controls::compute(&self.tileset.borrow(), self.current_tile.is_some());
    }

    fn update_tile_info(&mut self) {
        let tileset = self.tileset.borrow();
        match self.current_tile.and_then(|id| tileset.tile(id) ) {
            Some(tile) => self.table.update(tile.properties()),
            None => self.table.clear(),
        }
    }

    /// Write the table back into the current tile.
    /// Edits made while properties are disabled are discarded instead.
    pub fn flush_properties(&mut self) {
        if !self.table.is_dirty() {
            return;
        }
        if !self.controls.properties {
            log::debug!("Discarding property edits on read-only tile {:?}", self.current_tile);
            self.update_tile_info();
            return;
        }
        let Some(id) = self.current_tile else {return};
        let properties = self.table.properties();
        if let Some(tile) = self.tileset.borrow_mut().tile_mut(id) {
            tile.set_properties(properties.clone());
        }
        self.table.update(&properties);
    }

    fn add_tiles(&mut self, prompter: &mut impl Prompter) {
        if !self.controls.add {
            return;
        }
        let Some(files) = prompter.pick_images("Add Tile") else {return};

        for file in &files {
            let image = match load_tile_image(file) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("Aborting tile import: {}", e);
                    prompter.error("Error!", &e.to_string());
                    break;
                },
            };

            let result = self.tileset.borrow_mut().add_new_tile(Tile::new(image));
            match result {
                Ok(id) => log::info!("Added tile {} from {}", id, file.display()),
                Err(e) => {
                    log::error!("Failed to add tile from {}: {}", file.display(), e);
                    prompter.error("Error while loading tiles!", &e.to_string());
                    break;
                },
            }
        }

        self.query_tiles();
    }

    fn duplicate_tile(&mut self, prompter: &mut impl Prompter) {
        if !self.controls.duplicate {
            return;
        }
        let Some(id) = self.current_tile else {return};
        self.flush_properties();

        let result = {
            let mut tileset = self.tileset.borrow_mut();
            match tileset.tile(id).map(Tile::copy_of) {
                Some(copy) => tileset.add_new_tile(copy).map(Some),
                None => Ok(None),
            }
        };

        match result {
            Ok(Some(new_id)) => log::info!("Duplicated tile {} as {}", id, new_id),
            Ok(None) => {},
            Err(e) => {
                log::error!("Failed to duplicate tile {}: {}", id, e);
                prompter.error("Error while loading tiles!", &e.to_string());
            },
        }

        self.query_tiles();
    }

    fn delete_tile(&mut self, prompter: &mut impl Prompter) {
        if !self.controls.delete {
            return;
        }
        let Some(id) = self.list.selected_value().or(self.current_tile) else {return};
        if !prompter.confirm("Are you sure?", "Delete tile?") {
            return;
        }

        let result = self.tileset.borrow_mut().remove_tile(id);
        match result {
            Ok(Some(_)) => {
                log::info!("Deleted tile {}", id);
                if self.current_tile == Some(id) {
                    // nothing left to write back to
                    self.table.clear();
                    self.current_tile = None;
                    self.list.set_selected_index(None);
                    self.update_controls();
                }
            },
            Ok(None) => {},
            Err(e) => {
                log::error!("Failed to delete tile {}: {}", id, e);
                prompter.error("Error!", &e.to_string());
            },
        }

        self.query_tiles();
    }

    fn change_image(&mut self, prompter: &mut impl Prompter) {
        if !self.controls.change_image {
            return;
        }
        let Some(id) = self.current_tile else {return};
        let Some(file) = prompter.pick_image("Change Image") else {return};

        match load_tile_image(&file) {
            Ok(image) => {
                if let Some(tile) = self.tileset.borrow_mut().tile_mut(id) {
                    tile.set_image(image);
                    log::info!("Replaced image of tile {} with {}", id, file.display());
                }
            },
            Err(e) => {
                log::warn!("Keeping image of tile {}: {}", id, e);
                prompter.error("Error loading image", &e.to_string());
            },
        }
    }

    fn confirm(&mut self) {
        self.flush_properties();
        self.open = false;
        log::info!("Closed tile set editor of '{}'", self.tileset.borrow().name());
    }
}
