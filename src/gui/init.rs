use std::path::PathBuf;

use scoped_tls_hkt::scoped_thread_local;

use crate::cli::Args;
use crate::config::Config;
use crate::tile::TileSet;
use crate::util::ResultExt;

use super::prompt::RfdPrompter;
use super::tile_dialog::TileDialog;
use super::top_panel::{TopPanel, top_panel_ui};
use super::window_states::tileset::{Tilesets, tileset_from_images, tilesets_ui};
use super::MutQueue;

const CRATE_NAME: Option<&str> = option_env!("CARGO_PKG_NAME");
const CRATE_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub fn launch_gui(args: Args, config: Config) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} {}", CRATE_NAME.unwrap_or("tilesed"), CRATE_VERSION.unwrap_or("")))
            .with_inner_size([900.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let config_path = args.config.clone();
    let init_load = InitLoad::from_args(args);

    eframe::run_native(
        "tilesed",
        options,
        Box::new(move |_| {
            Box::new(SharedApp::new(config, config_path, init_load))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e) )
}

/// Tile set requested on the command line, loaded in the first frame
pub struct InitLoad {
    pub name: String,
    pub tilebmp: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub images: Vec<PathBuf>,
}

impl InitLoad {
    fn from_args(args: Args) -> Option<Self> {
        if args.tilebmp.is_none() && args.images.is_empty() {
            return None;
        }
        Some(Self {
            name: args.name,
            tilebmp: args.tilebmp,
            source: args.source,
            images: args.images,
        })
    }

    fn load(self, tile_size: [u32;2]) -> anyhow::Result<TileSet> {
        let mut tileset = match &self.tilebmp {
            Some(bmp) => TileSet::from_bitmap(self.name, bmp, tile_size)?,
            None => tileset_from_images(self.name, &self.images)?,
        };
        tileset.set_source(self.source);
        Ok(tileset)
    }
}

pub struct SharedApp {
    pub top_panel: TopPanel,
    pub tilesets: Tilesets,
    pub dialog: Option<TileDialog>,
    pub config: Config,
    pub config_path: PathBuf,
    pub init_load: Option<InitLoad>,
    pub sam: SAM,
}

pub struct SAM {
    pub mut_queue: MutQueue,
    pub prompter: RfdPrompter,
}

impl SharedApp {
    fn new(config: Config, config_path: PathBuf, init_load: Option<InitLoad>) -> Self {
        Self {
            top_panel: TopPanel::new(config.tile_size),
            tilesets: Tilesets::new(),
            dialog: None,
            sam: SAM {
                mut_queue: vec![],
                prompter: RfdPrompter::new(config.last_dir.clone()),
            },
            config,
            config_path,
            init_load,
        }
    }

    fn dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.dialog else {return};
        dialog.ui(ctx, &mut self.sam.prompter);
        if !dialog.is_open() {
            self.dialog = None;
        }
    }
}

impl eframe::App for SharedApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        EFRAME_FRAME.set(frame, || {
            for v in std::mem::take(&mut self.sam.mut_queue) {
                v(self);
            }

            if let Some(init) = self.init_load.take() {
                if let Some(ts) = init.load(self.config.tile_size).unwrap_gui("Failed to open tile set") {
                    let ts = self.tilesets.insert(ts);
                    self.open_tile_dialog(ts);
                }
            }

            let modal = self.dialog.is_some();

            if !modal {
                self.handle_filedrop(ctx);
            }

            egui::TopBottomPanel::top("main_top_panel")
                .show(ctx, |ui| {
                    ui.set_enabled(!modal);
                    top_panel_ui(self, ui)
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                ui.set_enabled(!modal);
                tilesets_ui(self, ui)
            });

            self.dialog_ui(ctx);

            for v in std::mem::take(&mut self.sam.mut_queue) {
                v(self);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.last_dir = self.sam.prompter.last_dir.clone();
        if let Err(e) = self.config.save(&self.config_path) {
            log::error!("{:#}", e);
        }
    }
}

scoped_thread_local! {
    pub(crate) static mut EFRAME_FRAME: eframe::Frame
}
