use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::Config;
use crate::gui::init::launch_gui;

const LOG4RS_FILE: &str = "log4rs.yaml";

pub fn cli() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(size) = args.tile_size {
        config.tile_size = size;
    }

    init_logging(config.log_level)?;
    log::info!("Starting up");

    launch_gui(args, config)
}

/// From `log4rs.yaml` if present, else to stderr
fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    if Path::new(LOG4RS_FILE).is_file() {
        log4rs::init_file(LOG4RS_FILE, Default::default())?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l:5})} {t} - {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// tilesed
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(clap::ArgGroup::new("input").args(["tilebmp", "images"]).multiple(true)))]
pub struct Args {
    /// Name of the tile set opened on startup
    #[arg(long, default_value = "Untitled")]
    pub name: String,

    /// Slice this bitmap into tiles instead of loading the given images
    #[arg(long)]
    pub tilebmp: Option<PathBuf>,

    /// Tile size for --tilebmp, as WxH
    #[arg(long, value_parser = parse_tile_size)]
    pub tile_size: Option<[u32;2]>,

    /// Mark the opened tile set as loaded from this external file, making it read-only
    #[arg(long, requires = "input")]
    pub source: Option<PathBuf>,

    /// Settings file
    #[arg(long, default_value = "tilesed.json")]
    pub config: PathBuf,

    /// Overrides the log level of the settings file (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<LevelFilter>,

    /// Images to open as tiles of a new tile set
    #[arg()]
    pub images: Vec<PathBuf>,
}

pub fn parse_tile_size(v: &str) -> Result<[u32;2],String> {
    let (w,h) = v.split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WxH, got '{}'", v) )?;
    let parse = |s: &str| match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("invalid tile dimension '{}'", s)),
        Ok(n) => Ok(n),
    };
    Ok([parse(w)?, parse(h)?])
}
