//! Pictor command-line front end.
//!
//! Starts the privileged lister behind the `fs:dir` bridge, wires an image
//! viewer to it, lists the seed path, then treats every line read from stdin
//! as a new value typed into the path input. After each listing settles the
//! viewer's directory entries and image frames are printed.
//!
//! An optional `pictor.toml` in the working directory overrides the viewer
//! defaults. Log output goes to stderr and honours `RUST_LOG`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pictor::{ImageViewer, Settlement, ViewerConfig};
use pictor_fs::{Bridge, DirectoryLister, ListerConfig};

const CONFIG_FILE: &str = "pictor.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = if Path::new(CONFIG_FILE).is_file() {
        ViewerConfig::load(CONFIG_FILE)?
    } else {
        ViewerConfig::default()
    };

    let mut lister_config = ListerConfig::new();
    if let Some(asset_root) = &config.asset_root {
        lister_config = lister_config.with_asset_root(asset_root);
    }
    let lister = DirectoryLister::new(lister_config);
    let client = Bridge::spawn(Arc::new(lister));
    let viewer = ImageViewer::new(Arc::new(client), config)?;

    let (sender, mut settlements) = mpsc::unbounded_channel();
    viewer.settled.connect(move |settlement: &Settlement| {
        let _ = sender.send(settlement.clone());
    });

    viewer.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut settled = 0;
    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => viewer.input().set_text(line.trim()),
                None => stdin_open = false,
            },
            Some(settlement) = settlements.recv() => {
                settled += 1;
                print_settlement(&viewer, &settlement);
            }
            else => break,
        }
        if !stdin_open && settled >= viewer.latest_generation() {
            break;
        }
    }

    Ok(())
}

fn print_settlement(viewer: &ImageViewer, settlement: &Settlement) {
    match settlement {
        Settlement::Applied { path, .. } => {
            println!("{path}");
            for directory in viewer.directories() {
                println!("  [dir] {directory}");
            }
            for url in viewer.image_urls() {
                println!("  [img] {url}");
            }
        }
        Settlement::Failed { path, error, .. } => {
            println!("{path}: listing failed: {error}");
        }
        Settlement::DiscardedStale { .. } => {}
    }
}
