use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use inlinemark::{EmphasisExtras, Extension, outline_document};

#[derive(Parser)]
#[command(name = "inlinemark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse inline emphasis and its extensions into an outline")]
struct Cli {
    /// Input file to parse (stdin if not provided)
    file: Option<PathBuf>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra families to enable, overriding the config (e.g. strikeout,marked)
    #[arg(long, value_enum, value_delimiter = ',')]
    extensions: Option<Vec<Extension>>,

    /// Print the concrete syntax tree instead of the outline
    #[arg(long)]
    cst: bool,
}

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let start_dir = start_dir_for(&cli.file)?;
    let (cfg, cfg_path) = inlinemark::config::load(cli.config.as_deref(), &start_dir)?;
    if let Some(path) = &cfg_path {
        log::info!("Loaded config from {}", path.display());
    }

    let extras: EmphasisExtras = match cli.extensions {
        Some(list) => list.into_iter().collect(),
        None => cfg.extras(),
    };

    let input = read_all(cli.file.as_ref())?;

    if cli.cst {
        let tree = inlinemark::parse(&input, extras);
        print!("{tree:#?}");
    } else {
        print!("{}", outline_document(&input, extras));
    }

    Ok(())
}
