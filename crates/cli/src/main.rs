#![deny(unsafe_code)]
//! CLI binary for the blob-poster generator.
//!
//! Subcommands:
//! - `render`: generate a poster and write it as PNG or SVG
//! - `layers`: print the composed layers as JSON
//! - `palette`: print the palette a mode and seed produce
//! - `modes`: list palette modes and the parameter schema

mod error;

use blob_poster_core::compose::PALETTE_SIZE;
use blob_poster_core::{
    compose_layers, generate, generate_palette, ColorTable, ColorTableProvider, PaletteMode,
    Range, RenderParameters, Xorshift64,
};
use blob_poster_export::{ColorTableFile, DEFAULT_PALETTE_FILE};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "blob-poster", about = "Generative blob poster CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a poster and write it to a PNG or SVG file.
    Render {
        #[command(flatten)]
        poster: PosterArgs,

        /// Output file path; the extension picks the format (.png or .svg).
        #[arg(short, long, default_value = "poster.png")]
        output: PathBuf,
    },
    /// Print the composed layers (shape, color, opacity) as JSON.
    Layers {
        #[command(flatten)]
        poster: PosterArgs,
    },
    /// Print the palette generated for the given mode and seed.
    Palette {
        #[command(flatten)]
        poster: PosterArgs,
    },
    /// List palette modes and the parameter schema.
    Modes,
}

/// Poster parameters. Flags override values given in `--params`.
#[derive(Args)]
struct PosterArgs {
    /// Parameters as a JSON object (see `modes --json` for the schema).
    #[arg(long, default_value = "{}")]
    params: String,

    /// Number of blob layers.
    #[arg(short, long)]
    layers: Option<usize>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Palette mode (pastel, vivid, mono, random, external).
    #[arg(short, long)]
    mode: Option<String>,

    /// Blob radius range as "min,max".
    #[arg(long, value_parser = parse_range)]
    radius: Option<Range>,

    /// Wobble range as "min,max".
    #[arg(long, value_parser = parse_range)]
    wobble: Option<Range>,

    /// Opacity range as "min,max".
    #[arg(long, value_parser = parse_range)]
    opacity: Option<Range>,

    /// Shadow offset in unit poster space.
    #[arg(long)]
    shadow: Option<f64>,

    /// Hue for the mono palette, in [0, 1].
    #[arg(long)]
    base_hue: Option<f64>,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// CSV color table for the external mode; created with defaults if missing.
    #[arg(long, default_value = DEFAULT_PALETTE_FILE)]
    palette_file: PathBuf,
}

impl PosterArgs {
    fn to_params(&self) -> Result<RenderParameters, CliError> {
        let json: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut p = RenderParameters::from_json(&json)?;
        if let Some(v) = self.layers {
            p.layer_count = v;
        }
        if let Some(v) = self.seed {
            p.seed = v;
        }
        if let Some(v) = &self.mode {
            p.mode = PaletteMode::from_name(v);
        }
        if let Some(v) = self.radius {
            p.radius = v;
        }
        if let Some(v) = self.wobble {
            p.wobble = v;
        }
        if let Some(v) = self.opacity {
            p.opacity = v;
        }
        if let Some(v) = self.shadow {
            p.shadow_offset = v;
        }
        if let Some(v) = self.base_hue {
            p.base_hue = v;
        }
        if let Some(v) = self.width {
            p.width = v;
        }
        if let Some(v) = self.height {
            p.height = v;
        }
        Ok(p)
    }

    fn color_table(&self, mode: PaletteMode) -> Result<Option<ColorTable>, CliError> {
        if mode != PaletteMode::External {
            return Ok(None);
        }
        Ok(Some(ColorTableFile::new(&self.palette_file).color_table()?))
    }
}

fn parse_range(s: &str) -> Result<Range, String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"min,max\", got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number \"{v}\": {e}"))
    };
    Ok(Range::new(parse(min)?, parse(max)?))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Modes => {
            let modes = PaletteMode::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "modes": modes,
                    "params": RenderParameters::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palette modes:");
                println!("  {}", modes.join(", "));
                println!("Defaults:");
                println!(
                    "  {}",
                    serde_json::to_string(&RenderParameters::default().to_json())?
                );
            }
        }
        Command::Palette { poster } => {
            let params = poster.to_params()?;
            let table = poster.color_table(params.mode)?;
            let mut rng = Xorshift64::new(params.seed);
            let palette = generate_palette(
                PALETTE_SIZE,
                params.mode,
                params.base_hue,
                &mut rng,
                table.as_ref(),
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&palette)?);
            } else {
                for color in palette.colors() {
                    println!("{}", color.to_hex());
                }
            }
        }
        Command::Layers { poster } => {
            let params = poster.to_params()?;
            let table = poster.color_table(params.mode)?;
            let layers = compose_layers(&params, table.as_ref());
            // Layers are data, so this is JSON with or without --json.
            println!("{}", serde_json::to_string_pretty(&layers)?);
        }
        Command::Render { poster, output } => {
            let params = poster.to_params()?;
            let tables = ColorTableFile::new(&poster.palette_file);
            let generated = generate(&params, &tables)?;
            let format = blob_poster_export::export(&generated, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "params": params.to_json(),
                    "layers": generated.layers().len(),
                    "format": format!("{format:?}").to_lowercase(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} layers ({} palette, seed {}, {}x{}) -> {}",
                    generated.layers().len(),
                    params.mode,
                    params.seed,
                    params.width,
                    params.height,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("blob-poster").chain(args.iter().copied())).unwrap()
    }

    fn poster_args(cli: Cli) -> PosterArgs {
        match cli.command {
            Command::Render { poster, .. }
            | Command::Layers { poster }
            | Command::Palette { poster } => poster,
            Command::Modes => panic!("modes has no poster args"),
        }
    }

    #[test]
    fn parse_range_accepts_comma_pair() {
        assert_eq!(parse_range("0.1, 0.3").unwrap(), Range::new(0.1, 0.3));
    }

    #[test]
    fn parse_range_rejects_garbage() {
        assert!(parse_range("0.1").is_err());
        assert!(parse_range("a,b").is_err());
    }

    #[test]
    fn no_flags_gives_default_params() {
        let args = poster_args(parse(&["layers"]));
        assert_eq!(args.to_params().unwrap(), RenderParameters::default());
    }

    #[test]
    fn flags_override_params_json() {
        let args = poster_args(parse(&[
            "render",
            "--params",
            r#"{"layer_count": 5, "seed": 7, "mode": "vivid"}"#,
            "--seed",
            "99",
            "--radius",
            "0.2,0.4",
            "-W",
            "300",
        ]));
        let p = args.to_params().unwrap();
        assert_eq!(p.layer_count, 5);
        assert_eq!(p.seed, 99);
        assert_eq!(p.mode, PaletteMode::Vivid);
        assert_eq!(p.radius, Range::new(0.2, 0.4));
        assert_eq!(p.width, 300);
    }

    #[test]
    fn unknown_mode_flag_falls_back_to_random() {
        let args = poster_args(parse(&["palette", "--mode", "csv"]));
        assert_eq!(args.to_params().unwrap().mode, PaletteMode::Random);
    }

    #[test]
    fn invalid_params_json_is_input_error() {
        let args = poster_args(parse(&["layers", "--params", "{nope"]));
        let err = args.to_params().unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn non_external_mode_skips_palette_file() {
        let args = poster_args(parse(&[
            "palette",
            "--palette-file",
            "/nonexistent/dir/palette.csv",
        ]));
        assert!(args.color_table(PaletteMode::Pastel).unwrap().is_none());
    }

    #[test]
    fn render_output_defaults_to_png() {
        match parse(&["render"]).command {
            Command::Render { output, .. } => assert_eq!(output, PathBuf::from("poster.png")),
            _ => panic!("expected render"),
        }
    }
}
