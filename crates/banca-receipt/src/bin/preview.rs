//! # Receipt Preview Tool
//!
//! Renders a sale fixture to both PDF layouts for development.
//!
//! ## Usage
//! ```bash
//! # Render both layouts into the current directory
//! cargo run -p banca-receipt --bin preview -- sale.json
//!
//! # With merchant settings and an output directory
//! cargo run -p banca-receipt --bin preview -- sale.json settings.json out/
//! ```
//!
//! `sale.json` is a sale payload as the remote API returns it; the optional
//! `settings.json` is a string map of merchant settings.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use banca_core::{Sale, SettingsMap};
use banca_receipt::{export_pdf, DocumentKind};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("preview: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(sale_path) = args.first() else {
        return Err("usage: preview <sale.json> [settings.json] [out-dir]".to_string());
    };

    let sale: Sale = read_json(Path::new(sale_path))?;
    let settings: SettingsMap = match args.get(1) {
        Some(path) => read_json(Path::new(path))?,
        None => SettingsMap::new(),
    };
    let out_dir: PathBuf = args.get(2).map(PathBuf::from).unwrap_or_else(|| ".".into());

    for kind in [DocumentKind::Thermal, DocumentKind::A4] {
        let export = export_pdf(kind, &sale, &settings)
            .map_err(|e| format!("{:?} export failed: {}", kind, e))?;
        let path = export
            .save_to(&out_dir)
            .map_err(|e| format!("saving {} failed: {}", export.file_name, e))?;
        println!("{}", path.display());
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}
