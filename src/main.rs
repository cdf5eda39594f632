mod assets;
mod sim;

use std::path::PathBuf;

use clap::Parser;
use campus_world::{Campus, CampusConfig, load_config_from_path};

/// Procedural campus: generates the world and walks an actor through it headlessly.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Campus config (TOML). Defaults to `campus.toml` under the assets root.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Assets root containing `assets/textures`.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Frame time in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Movement keys held for the whole run, e.g. `WD`.
    #[arg(long, default_value = "")]
    keys: String,

    /// Horizontal mouse delta applied every frame.
    #[arg(long, default_value_t = 0.0)]
    turn: f32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let root = assets::resolve_assets_root(args.assets.as_deref());
    log::info!("assets root: {}", root.display());

    let config_path = args.config.clone().unwrap_or_else(|| assets::config_path(&root));
    let cfg = if config_path.exists() {
        match load_config_from_path(&config_path) {
            Ok(c) => {
                log::info!("loaded campus config from {}", config_path.display());
                c
            }
            Err(e) => {
                log::warn!("failed to load {}: {}; using defaults", config_path.display(), e);
                CampusConfig::default()
            }
        }
    } else {
        if args.config.is_some() {
            log::warn!("config {} not found; using defaults", config_path.display());
        }
        CampusConfig::default()
    };

    let materials = assets::MaterialLibrary::load(&assets::textures_dir(&root));
    if materials.placeholder_count() > 0 {
        log::warn!("{} materials fell back to placeholder textures", materials.placeholder_count());
    }

    let campus = Campus::generate(&cfg.buildings);
    log::info!(
        "campus ready: {} buildings, {} render parts, {} obstacles",
        campus.buildings.len(),
        campus.render_parts().count(),
        campus.obstacles().len()
    );

    let mut session = sim::Session::new(&cfg, campus);
    session.hold(&sim::parse_keys(&args.keys));
    let stats = session.run(args.ticks, args.dt, args.turn);
    let p = session.position;
    let c = session.camera.position;
    log::info!(
        "after {} ticks: actor=({:.2}, {:.2}, {:.2}) camera=({:.2}, {:.2}, {:.2})",
        session.tick,
        p.x,
        p.y,
        p.z,
        c.x,
        c.y,
        c.z
    );
    log::info!(
        "moved {} ticks, {} contacts, {} slides, {} on ramps, {} indoors",
        stats.moved,
        stats.contacts,
        stats.slides,
        stats.ramp_ticks,
        stats.inside_ticks
    );
}
