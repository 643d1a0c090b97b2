//! bigtext - Render text as block-letter ASCII art using FIGlet fonts

use asciix::text::{FontLibrary, DEFAULT_FONT};
use asciix::AsciixError;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bigtext", about = "Render text as block-letter ASCII art")]
struct Args {
    /// Text to render
    text: String,
    /// FIGlet font name, or a path to a .flf file
    #[arg(short, long, default_value = DEFAULT_FONT)]
    font: String,
    /// Directory searched for <font>.flf (repeatable)
    #[arg(long)]
    font_dir: Vec<PathBuf>,
    /// Blank columns inserted between glyph columns
    #[arg(short, long, default_value = "0")]
    spacing: usize,
    /// Write the art to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), AsciixError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let fonts = args
        .font_dir
        .iter()
        .fold(FontLibrary::new(), |lib, dir| lib.with_dir(dir));
    let art = fonts.render(&args.text, &args.font, args.spacing)?;

    match args.output {
        Some(path) => std::fs::write(path, art)?,
        None => print!("{}", art),
    }
    Ok(())
}
