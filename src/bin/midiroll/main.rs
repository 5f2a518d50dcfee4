//! midiroll - terminal piano roll viewer for Standard MIDI Files
//!
//! Run with: cargo run -- song.mid [--resolution N] [--write OUT.mid]

mod app;
mod ui;

use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use midiroll::{LoadOptions, MidiDocument};

use app::App;

const USAGE: &str = "usage: midiroll <file.mid> [--resolution N] [--write OUT.mid]";

/// Command line arguments
struct Args {
    input: PathBuf,
    resolution: Option<u32>,
    write: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> EyreResult<Self> {
        let mut input = None;
        let mut resolution = None;
        let mut write = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--resolution" | "-r" => {
                    let value = args.next().ok_or_else(|| eyre!("--resolution needs a value"))?;
                    let ticks = value
                        .parse::<u32>()
                        .wrap_err_with(|| format!("invalid resolution {:?}", value))?;
                    resolution = Some(ticks);
                }
                "--write" | "-w" => {
                    let value = args.next().ok_or_else(|| eyre!("--write needs a path"))?;
                    write = Some(PathBuf::from(value));
                }
                "--help" | "-h" => bail!(USAGE),
                _ if input.is_none() => input = Some(PathBuf::from(arg)),
                _ => bail!("unexpected argument {:?}\n{}", arg, USAGE),
            }
        }

        let input = input.ok_or_else(|| eyre!(USAGE))?;
        Ok(Self {
            input,
            resolution,
            write,
        })
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1))?;

    let mut options = LoadOptions::new();
    if let Some(resolution) = args.resolution {
        options = options.resolution(resolution);
    }

    let loaded = MidiDocument::from_file(&args.input, &options)
        .wrap_err_with(|| format!("failed to load {}", args.input.display()))?;
    let mut advisories = loaded.advisories;
    let document = loaded.document;

    if let Some(out) = &args.write {
        let written = document
            .write(out)
            .wrap_err_with(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote {}", out.display());
        advisories.extend(written);
    }

    let mut app = App::new(document, advisories);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
