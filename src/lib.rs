pub mod util;
pub mod tile;
pub mod gui;
pub mod config;
pub mod cli;

pub type SRc<T> = std::rc::Rc<T>;
