use std::path::{Path, PathBuf};

use image::{GenericImageView, RgbaImage};

use crate::util::img::{load_tile_image, TileImageError};

use super::{Tile, TileId};

#[derive(Debug, thiserror::Error)]
pub enum TileSetError {
    #[error("Tile set '{0}' is read-only")]
    ReadOnly(String),
    #[error("Tile set '{0}' has no free tile ids left")]
    IdsExhausted(String),
    #[error("Invalid tile size {0}x{1}")]
    InvalidTileSize(u32,u32),
    #[error("Tile size {tile_w}x{tile_h} does not fit into bitmap of {img_w}x{img_h}")]
    BitmapTooSmall {
        tile_w: u32,
        tile_h: u32,
        img_w: u32,
        img_h: u32,
    },
    #[error(transparent)]
    Image(#[from] TileImageError),
}

pub struct TileSet {
    name: String,
    source: Option<PathBuf>,
    tilebmp_file: Option<PathBuf>,
    tilebmp_columns: u32,
    tiles: Vec<Tile>,
    next_id: u32,
}

impl TileSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            tilebmp_file: None,
            tilebmp_columns: 0,
            tiles: vec![],
            next_id: 0,
        }
    }

    /// Slice a bitmap into tiles of `[w,h]`, row by row. Partial tiles at the right and bottom edge are skipped.
    pub fn from_bitmap(name: impl Into<String>, path: impl AsRef<Path>, [tile_w,tile_h]: [u32;2]) -> Result<Self,TileSetError> {
        let path = path.as_ref();
        let image = load_tile_image(path)?;
        let mut ts = Self::new(name);
        ts.slice_bitmap(&image, [tile_w,tile_h])?;
        ts.tilebmp_file = Some(path.to_owned());
        log::info!("Sliced {} into {} tiles of {}x{}", path.display(), ts.total_tiles(), tile_w, tile_h);
        Ok(ts)
    }

    fn slice_bitmap(&mut self, image: &RgbaImage, [tile_w,tile_h]: [u32;2]) -> Result<(),TileSetError> {
        if tile_w == 0 || tile_h == 0 {
            return Err(TileSetError::InvalidTileSize(tile_w, tile_h));
        }
        let (img_w,img_h) = image.dimensions();
        if tile_w > img_w || tile_h > img_h {
            return Err(TileSetError::BitmapTooSmall { tile_w, tile_h, img_w, img_h });
        }

        let (columns,rows) = (img_w / tile_w, img_h / tile_h);
        for y in 0 .. rows {
            for x in 0 .. columns {
                let slice = image.view(x * tile_w, y * tile_h, tile_w, tile_h).to_image();
                self.push_tile(Tile::new(slice))?;
            }
        }
        self.tilebmp_columns = columns;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// External file this set was loaded from. Sets with a source are not editable here.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<PathBuf>) {
        self.source = source;
    }

    /// Bitmap the tiles were sliced from
    pub fn tilebmp_file(&self) -> Option<&Path> {
        self.tilebmp_file.as_deref()
    }

    /// Number of slice columns of a bitmap-backed set, 0 otherwise
    pub fn tilebmp_columns(&self) -> u32 {
        self.tilebmp_columns
    }

    pub fn is_internal(&self) -> bool {
        self.source.is_none()
    }

    pub fn is_bitmap_backed(&self) -> bool {
        self.tilebmp_file.is_some()
    }

    /// Whether tiles may be added, removed or have their image replaced
    pub fn is_editable(&self) -> bool {
        self.is_internal() && !self.is_bitmap_backed()
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id )
    }

    /// Not gated on [`is_editable`](Self::is_editable), callers check before writing
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == id )
    }

    pub fn tile_at(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position)
    }

    pub fn position_of(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == id )
    }

    /// Append a tile, assigning it a fresh id and the next gid
    pub fn add_new_tile(&mut self, tile: Tile) -> Result<TileId,TileSetError> {
        if !self.is_editable() {
            return Err(TileSetError::ReadOnly(self.name.clone()));
        }
        self.push_tile(tile)
    }

    fn push_tile(&mut self, mut tile: Tile) -> Result<TileId,TileSetError> {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.checked_add(1)
            .ok_or_else(|| TileSetError::IdsExhausted(self.name.clone()) )?;
        tile.id = id;
        tile.gid = self.tiles.len() as u32 + 1;
        self.tiles.push(tile);
        Ok(id)
    }

    /// `Ok(None)` if no tile has this id
    pub fn remove_tile(&mut self, id: TileId) -> Result<Option<Tile>,TileSetError> {
        if !self.is_editable() {
            return Err(TileSetError::ReadOnly(self.name.clone()));
        }
        let Some(pos) = self.position_of(id) else {return Ok(None)};
        let removed = self.tiles.remove(pos);
        self.renumber_from(pos);
        Ok(Some(removed))
    }

    fn renumber_from(&mut self, pos: usize) {
        for (i,t) in self.tiles.iter_mut().enumerate().skip(pos) {
            t.gid = i as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn solid(v: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([v, v, v, 255]))
    }

    #[test]
    fn gids_follow_positions() {
        let mut ts = TileSet::new("t");
        let a = ts.add_new_tile(Tile::new(solid(1))).unwrap();
        let b = ts.add_new_tile(Tile::new(solid(2))).unwrap();
        let c = ts.add_new_tile(Tile::new(solid(3))).unwrap();
        assert_eq!(ts.tile(c).unwrap().gid(), 3);

        let removed = ts.remove_tile(a).unwrap().unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(ts.tile(b).unwrap().gid(), 1);
        assert_eq!(ts.tile(c).unwrap().gid(), 2);
        assert_eq!(ts.position_of(c), Some(1));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut ts = TileSet::new("t");
        let a = ts.add_new_tile(Tile::new(solid(1))).unwrap();
        ts.remove_tile(a).unwrap();
        let b = ts.add_new_tile(Tile::new(solid(1))).unwrap();
        assert_ne!(a, b);
        assert!(ts.remove_tile(a).unwrap().is_none());
    }

    #[test]
    fn external_set_is_read_only() {
        let mut ts = TileSet::new("ext");
        ts.set_source(Some("ext.tsx".into()));
        assert!(!ts.is_internal());
        assert!(matches!(ts.add_new_tile(Tile::new(solid(0))), Err(TileSetError::ReadOnly(_))));
        assert_eq!(ts.total_tiles(), 0);
    }

    #[test]
    fn read_only_set_refuses_removal() {
        let mut ts = TileSet::new("ext");
        let a = ts.add_new_tile(Tile::new(solid(1))).unwrap();
        ts.set_source(Some("ext.tsx".into()));
        assert!(matches!(ts.remove_tile(a), Err(TileSetError::ReadOnly(_))));
        assert_eq!(ts.total_tiles(), 1);
        assert_eq!(ts.tile(a).unwrap().gid(), 1);
    }

    #[test]
    fn slices_bitmap_row_by_row() {
        let mut bitmap = RgbaImage::new(5, 4);
        for (x,y,p) in bitmap.enumerate_pixels_mut() {
            *p = Rgba([(x / 2) as u8, (y / 2) as u8, 0, 255]);
        }

        let mut ts = TileSet::new("bmp");
        ts.slice_bitmap(&bitmap, [2,2]).unwrap();
        assert_eq!(ts.total_tiles(), 4);
        assert_eq!(ts.tilebmp_columns(), 2);
        let third = ts.tile_at(2).unwrap();
        assert_eq!(third.gid(), 3);
        assert_eq!(third.image().get_pixel(0, 0), &Rgba([0, 1, 0, 255]));
    }

    #[test]
    fn rejects_bad_tile_sizes() {
        let bitmap = RgbaImage::new(4, 4);
        let mut ts = TileSet::new("bmp");
        assert!(matches!(ts.slice_bitmap(&bitmap, [0,2]), Err(TileSetError::InvalidTileSize(0,2))));
        assert!(matches!(ts.slice_bitmap(&bitmap, [8,2]), Err(TileSetError::BitmapTooSmall{..})));
    }
}
