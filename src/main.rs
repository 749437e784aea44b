//! Command-line front end: converts font files into `epd_driver` glyph tables.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use epd_font_config::FontConvertConfig;
use epd_font_core::emit::emit_c_header;
use epd_font_core::{
    CodePointInterval, FontTable, FontTableOptions, GlyphCompression, PixelMode,
    build_interval_set,
};
use epd_font_raster::{load_font_stack, scan_coverage};

#[derive(Parser)]
#[command(
    name = "epd-fontconvert",
    version,
    about = "Generate a header file from a font to be used with epdiy"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rasterize a font stack into a static glyph table.
    Convert(ConvertArgs),
    /// Print the code point intervals covered by a font.
    Intervals {
        /// Font file to inspect.
        font: PathBuf,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Name of the font, used as identifier prefix.
    name: String,
    /// Font size to use, in points.
    size: u32,
    /// Font files, ordered by descending priority.
    #[arg(required = true)]
    fonts: Vec<PathBuf>,
    /// Compress glyph bitmaps.
    #[arg(long)]
    compress: bool,
    /// Additional code point interval to export as min,max. Can be repeated.
    #[arg(long = "additional-intervals", value_name = "MIN,MAX")]
    additional_intervals: Vec<CodePointInterval>,
    /// Output bitmaps with only two colors, for fast (DU) panel updates.
    #[arg(long)]
    two_color: bool,
    /// Panel resolution used for rasterization.
    #[arg(long)]
    dpi: Option<f32>,
    /// Write the header here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Configuration file (defaults to ./fontconvert.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert(args),
        Command::Intervals { font } => print_intervals(&font),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let config =
        FontConvertConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    let mut additional = config
        .intervals
        .additional
        .iter()
        .map(|spec| spec.parse::<CodePointInterval>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid interval in configuration")?;
    additional.extend(&args.additional_intervals);
    let intervals = build_interval_set(&additional)?;

    let dpi = args.dpi.unwrap_or(config.render.dpi);
    let options = FontTableOptions {
        mode: if args.two_color || config.render.two_color {
            PixelMode::TwoColor
        } else {
            PixelMode::FourBitGray
        },
        compression: GlyphCompression::from_flag(args.compress || config.render.compress),
        metrics_reference: config.intervals.metrics_reference as u32,
    };
    log::debug!(
        "{} intervals, {} pt at {dpi} dpi, {:?}, {:?}",
        intervals.len(),
        args.size,
        options.mode,
        options.compression
    );

    let fonts = load_font_stack(&args.fonts, args.size as f32, dpi)?;
    let table = FontTable::build(&args.name, &intervals, &fonts, options)
        .with_context(|| format!("failed to build font table {}", args.name))?;
    let header = emit_c_header(&table);

    match &args.output {
        Some(path) => std::fs::write(path, header)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(header.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

fn print_intervals(font: &Path) -> Result<()> {
    let intervals = scan_coverage(font)?;
    let mut out = std::io::stdout().lock();
    for interval in intervals {
        writeln!(out, "(0x{:x},0x{:x}),", interval.start, interval.end)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_arguments() {
        let cli = Cli::try_parse_from([
            "epd-fontconvert",
            "convert",
            "FiraSans",
            "12",
            "FiraSans.ttf",
            "Symbols.ttf",
            "--compress",
            "--additional-intervals",
            "0x2500,0x257F",
            "--additional-intervals",
            "9728,9983",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.name, "FiraSans");
        assert_eq!(args.size, 12);
        assert_eq!(args.fonts.len(), 2);
        assert!(args.compress);
        assert!(!args.two_color);
        assert_eq!(
            args.additional_intervals,
            vec![
                CodePointInterval::new(0x2500, 0x257F),
                CodePointInterval::new(0x2600, 0x26FF),
            ]
        );
    }

    #[test]
    fn malformed_interval_fails_at_parse_time() {
        let result = Cli::try_parse_from([
            "epd-fontconvert",
            "convert",
            "Font",
            "12",
            "font.ttf",
            "--additional-intervals",
            "0x2500",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn font_stack_is_required() {
        assert!(Cli::try_parse_from(["epd-fontconvert", "convert", "Font", "12"]).is_err());
    }
}
