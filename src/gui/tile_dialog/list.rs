use crate::tile::{Tile, TileId, TileSet};

/// Rows of the tile list, in tile set order
#[derive(Default)]
pub struct TileList {
    rows: Vec<TileId>,
    selected: Option<usize>,
    scroll_to_selected: bool,
    renderer: TileListRenderer,
}

impl TileList {
    pub fn set_list_data(&mut self, tileset: &TileSet) {
        self.rows = tileset.tiles().map(Tile::id).collect();
        if self.selected.is_some_and(|i| i >= self.rows.len() ) {
            self.selected = None;
        }
    }

    pub fn rows(&self) -> &[TileId] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<TileId> {
        self.selected.and_then(|i| self.rows.get(i).copied() )
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.rows.len() );
    }

    pub fn ensure_index_is_visible(&mut self) {
        self.scroll_to_selected = self.selected.is_some();
    }

    /// One-shot scroll request, cleared on read
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_selected)
    }

    pub fn renderer(&self) -> &TileListRenderer {
        &self.renderer
    }

    pub fn set_renderer(&mut self, renderer: TileListRenderer) {
        self.renderer = renderer;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TileListKind {
    #[default]
    Images,
    /// Slices of a bitmap with this many columns
    BitmapSlices { columns: u32 },
}

/// How list rows are drawn, derived from the tile set
#[derive(Clone, PartialEq, Debug)]
pub struct TileListRenderer {
    pub kind: TileListKind,
    pub read_only: bool,
    pub thumb_size: f32,
}

impl Default for TileListRenderer {
    fn default() -> Self {
        Self {
            kind: TileListKind::Images,
            read_only: false,
            thumb_size: 32.,
        }
    }
}

impl TileListRenderer {
    pub fn for_tileset(tileset: &TileSet, thumb_size: f32) -> Self {
        let kind = if tileset.is_bitmap_backed() {
            TileListKind::BitmapSlices { columns: tileset.tilebmp_columns().max(1) }
        } else {
            TileListKind::Images
        };
        Self {
            kind,
            read_only: !tileset.is_editable(),
            thumb_size,
        }
    }

    pub fn label(&self, tile: &Tile) -> String {
        let [w,h] = tile.size();
        match self.kind {
            TileListKind::Images => format!("Tile {} ({}x{})", tile.id(), w, h),
            TileListKind::BitmapSlices { columns } => {
                let pos = tile.gid().saturating_sub(1);
                format!("Tile {} [{},{}]", tile.id(), pos % columns, pos / columns)
            },
        }
    }
}
