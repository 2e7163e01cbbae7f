use self::init::SharedApp;

pub mod init;
pub mod top_panel;
pub mod window_states;
pub mod tile_dialog;
pub mod properties;
pub mod prompt;
pub mod texture;
pub mod util;
pub mod filedrop;

pub type MutQueue = Vec<Box<dyn FnOnce(&mut SharedApp)>>;
