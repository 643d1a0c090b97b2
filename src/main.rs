//! asciix CLI - Convert images to ASCII art

use asciix::bitmap::{self, BitmapStyle};
use asciix::{AsciiGrid, AsciixError, LumaWeights, RenderOptions, SourceImage};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asciix", about = "Convert images to ASCII art")]
struct Args {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// JSON file with a saved options snapshot; flags override it
    #[arg(long)]
    options: Option<PathBuf>,
    /// Output width in characters
    #[arg(short, long)]
    width: Option<u32>,
    /// Brightness offset (-255..255)
    #[arg(short, long, allow_hyphen_values = true)]
    brightness: Option<i32>,
    /// Contrast level, strictly between -255 and 259
    #[arg(short, long, allow_hyphen_values = true)]
    contrast: Option<f32>,
    /// Sharpen strength (0 disables)
    #[arg(short, long)]
    sharpen: Option<u32>,
    /// Turn light pixels into spaces (0 disables, up to 5)
    #[arg(short = 'd', long)]
    space_density: Option<u32>,
    /// Convert to grayscale before mapping (`--grayscale=false` overrides --options)
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    grayscale: Option<bool>,
    /// Invert the image (`--invert=false` overrides --options)
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    invert: Option<bool>,
    /// Characters from dark to light
    #[arg(long, allow_hyphen_values = true)]
    gradient: Option<String>,
    /// Crop to the inscribed circle (`--circle=false` overrides --options)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    circle: Option<bool>,
    /// Luminance weights: bt601 or bt709
    #[arg(long, value_parser = parse_luma)]
    luma: Option<LumaWeights>,
    /// Glyph width/height ratio used for the row count
    #[arg(long)]
    char_aspect: Option<f32>,
    /// Write the art to this file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write <stem>.txt (and <stem>.png with --png-export) per input here
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Render the art to a PNG at this path (single input only)
    #[arg(long)]
    png: Option<PathBuf>,
    /// Also write PNGs into --out-dir
    #[arg(long)]
    png_export: bool,
    /// Monospace TTF/OTF font for PNG rendering
    #[arg(long)]
    font: Option<PathBuf>,
    /// Font size in pixels for PNG rendering
    #[arg(long, default_value = "9")]
    font_size: f32,
    /// Print the effective options as JSON and exit
    #[arg(long)]
    dump_options: bool,
}

fn parse_luma(s: &str) -> Result<LumaWeights, String> {
    match s.to_ascii_lowercase().as_str() {
        "bt601" | "601" => Ok(LumaWeights::Bt601),
        "bt709" | "709" => Ok(LumaWeights::Bt709),
        _ => Err(format!("Unknown luma weights '{}'. Use bt601 or bt709", s)),
    }
}

impl Args {
    fn render_options(&self) -> Result<RenderOptions, AsciixError> {
        let mut opts = match &self.options {
            Some(path) => RenderOptions::load(path)?,
            None => RenderOptions::default(),
        };
        if let Some(v) = self.width {
            opts.width = v;
        }
        if let Some(v) = self.brightness {
            opts.brightness = v;
        }
        if let Some(v) = self.contrast {
            opts.contrast = v;
        }
        if let Some(v) = self.sharpen {
            opts.sharpen = v;
        }
        if let Some(v) = self.space_density {
            opts.space_density = v;
        }
        if let Some(v) = &self.gradient {
            opts.gradient = v.clone();
        }
        if let Some(v) = self.luma {
            opts.luma = v;
        }
        if let Some(v) = self.char_aspect {
            opts.char_aspect = v;
        }
        if let Some(v) = self.grayscale {
            opts.grayscale = v;
        }
        if let Some(v) = self.invert {
            opts.invert = v;
        }
        if let Some(v) = self.circle {
            opts.circle_mask = v;
        }
        opts.validate()?;
        Ok(opts)
    }
}

fn main() -> Result<(), AsciixError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = args.render_options()?;

    if args.dump_options {
        println!("{}", options.to_json()?);
        return Ok(());
    }

    let single = args.inputs.len() == 1;
    if !single && (args.output.is_some() || args.png.is_some()) {
        return Err(AsciixError::InvalidInput(
            "--output and --png take a single input; use --out-dir for batches".into(),
        ));
    }

    let style = BitmapStyle { font_size: args.font_size, ..Default::default() };
    let font = if args.png.is_some() || args.png_export {
        let path = args.font.as_ref().ok_or_else(|| {
            AsciixError::InvalidInput("PNG export needs a monospace font, pass --font".into())
        })?;
        Some(bitmap::open_font(path)?)
    } else {
        None
    };

    // Each input gets its own buffers
    let results: Vec<(&PathBuf, Result<AsciiGrid, AsciixError>)> = args
        .inputs
        .par_iter()
        .map(|path| {
            let grid = SourceImage::open(path).and_then(|src| asciix::convert(&src, &options));
            (path, grid)
        })
        .collect();

    let mut first_error = None;
    for (path, result) in results {
        let grid = match result {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("{}: {}", path.display(), e);
                first_error.get_or_insert(e);
                continue;
            }
        };

        if let Some(dir) = &args.out_dir {
            let stem = file_stem(path);
            grid.write_txt(dir.join(format!("{stem}.txt")))?;
            if let (true, Some(font)) = (args.png_export, &font) {
                bitmap::save_png(&grid, font, &style, dir.join(format!("{stem}.png")))?;
            }
        } else if let Some(out) = &args.output {
            grid.write_txt(out)?;
        } else if single {
            print!("{}", grid);
        } else {
            println!("==> {} <==", path.display());
            print!("{}", grid);
        }

        if let (Some(png), Some(font)) = (&args.png, &font) {
            bitmap::save_png(&grid, font, &style, png)?;
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ascii_art".to_string())
}
