use std::fmt;
use std::hash::BuildHasherDefault;

use ahash::AHasher;
use image::RgbaImage;
use indexmap::IndexMap;

use crate::util::next_op_gen_evo;

pub mod tileset;

pub use tileset::{TileSet, TileSetError};

/// Ordered key/value properties of a tile
pub type Properties = IndexMap<String,String,BuildHasherDefault<AHasher>>;

/// Per-set tile identifier. Allocated by the owning [`TileSet`], never reused within it.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tile. The id and gid are assigned when the tile is appended to a [`TileSet`].
#[derive(Clone)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) gid: u32,
    image: RgbaImage,
    image_evo: u64,
    properties: Properties,
}

impl Tile {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            id: TileId::default(),
            gid: 0,
            image,
            image_evo: next_op_gen_evo(),
            properties: Default::default(),
        }
    }

    /// Copy image and properties of another tile. The copy gets its own identity on insertion.
    pub fn copy_of(other: &Tile) -> Self {
        Self {
            id: TileId::default(),
            gid: 0,
            image: other.image.clone(),
            image_evo: next_op_gen_evo(),
            properties: other.properties.clone(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// 1-based position of the tile in its set
    pub fn gid(&self) -> u32 {
        self.gid
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Changes every time the image is replaced
    pub fn image_evo(&self) -> u64 {
        self.image_evo
    }

    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = image;
        self.image_evo = next_op_gen_evo();
    }

    pub fn size(&self) -> [u32;2] {
        [self.image.width(), self.image.height()]
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("id", &self.id)
            .field("gid", &self.gid)
            .field("size", &self.size())
            .field("properties", &self.properties)
            .finish()
    }
}
