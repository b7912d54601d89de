//! `labelkit` command line.
//!
//! Previews derived label colors and composed component styles, either as
//! JSON for tooling or as a colored swatch in the terminal.
//!
//! ```text
//! labelkit derive "#0969da" --mode dark --selected
//! labelkit token bug --fill "#d73a4a" --flags flags.yaml --format swatch
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use console::Style;
use labelkit::{
    detect_color_mode, ColorMode, CssColor, DeriveCache, DerivedStyle, FeatureFlags, LabelToken,
    StyleLayer,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Page color a translucent background is shown over.
const LIGHT_PAGE: (u8, u8, u8) = (255, 255, 255);
const DARK_PAGE: (u8, u8, u8) = (13, 17, 23);

#[derive(Parser, Debug)]
#[command(name = "labelkit", version)]
#[command(about = "Derive legible label colors and preview composed styles")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Color mode to derive for
    #[arg(long, value_enum, default_value_t = ModeArg::Auto, global = true)]
    mode: ModeArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive background, text and border colors for a fill color
    Derive {
        /// Fill color: hex, rgb(), hsl() or a color name
        color: String,

        /// Derive the selected state
        #[arg(long)]
        selected: bool,
    },

    /// Compose the final style of a label token
    Token {
        /// Token text
        text: String,

        /// Fill color (defaults to #999)
        #[arg(long)]
        fill: Option<String>,

        #[arg(long)]
        selected: bool,

        /// The token shows a remove action
        #[arg(long)]
        removable: bool,

        /// YAML file of feature flags
        #[arg(long, value_name = "FILE")]
        flags: Option<PathBuf>,

        /// YAML file with a caller style override
        #[arg(long, value_name = "FILE")]
        style: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Light,
    Dark,
    /// Follow the OS appearance
    Auto,
}

impl ModeArg {
    fn resolve(self) -> ColorMode {
        match self {
            ModeArg::Light => ColorMode::Light,
            ModeArg::Dark => ColorMode::Dark,
            ModeArg::Auto => detect_color_mode(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Swatch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mode = cli.mode.resolve();
    tracing::info!(%mode, format = ?cli.format, "resolved color mode");
    let mut cache = DeriveCache::new();

    match &cli.command {
        Command::Derive { color, selected } => {
            let derived = cache.derive(color, mode, *selected)?;
            match cli.format {
                Format::Json => {
                    let value = json!({ "derived": derived, "style": derived.to_layer() });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
                Format::Swatch => write_swatch(out, color, &derived)?,
            }
        }
        Command::Token {
            text,
            fill,
            selected,
            removable,
            flags,
            style,
        } => {
            let flags = match flags {
                Some(path) => FeatureFlags::from_file(path)
                    .with_context(|| format!("loading flags from {}", path.display()))?,
                None => FeatureFlags::new(),
            };
            let caller = style
                .as_ref()
                .map(StyleLayer::from_file)
                .transpose()
                .context("loading style override")?;

            let mut token = LabelToken::new(text.as_str())
                .selected(*selected)
                .removable(*removable);
            if let Some(fill) = fill {
                token = token.fill_color(fill.as_str());
            }

            let strategy = LabelToken::select_strategy(&flags);
            let composed = token.style(mode, &strategy, caller.as_ref(), &mut cache)?;
            match cli.format {
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&composed)?)?,
                Format::Swatch => {
                    let derived = token.derive(mode, &mut cache)?;
                    write_swatch(out, token.text(), &derived)?;
                    if let Some(class) = &composed.class_name {
                        writeln!(out, "  class       {}", class)?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn write_swatch(out: &mut impl Write, label: &str, derived: &DerivedStyle) -> io::Result<()> {
    let page = match derived.mode {
        ColorMode::Light => LIGHT_PAGE,
        ColorMode::Dark => DARK_PAGE,
    };
    let background = blend(&derived.effective_background(), page);
    let text = blend(&derived.text, page);
    let pill = Style::new()
        .color256(rgb_to_ansi256(text))
        .on_color256(rgb_to_ansi256(background));
    let border = Style::new().color256(rgb_to_ansi256(blend(&derived.border, page)));

    writeln!(
        out,
        "{}{}{}",
        border.apply_to("("),
        pill.apply_to(format!(" {} ", label)),
        border.apply_to(")")
    )?;
    writeln!(out, "  mode        {}", derived.mode)?;
    writeln!(out, "  background  {}", derived.effective_background())?;
    writeln!(out, "  text        {}", derived.text)?;
    writeln!(out, "  border      {}", derived.border)?;
    if let Some(selection) = &derived.selection {
        writeln!(out, "  halo        {}", selection.halo_color)?;
    }
    Ok(())
}

/// Composites a possibly translucent color over the page color.
fn blend(color: &CssColor, page: (u8, u8, u8)) -> (u8, u8, u8) {
    let alpha = color.alpha().clamp(0.0, 1.0);
    let (r, g, b) = color.to_rgb();
    let mix = |fg: u8, bg: u8| (f64::from(fg) * alpha + f64::from(bg) * (1.0 - alpha)).round() as u8;
    (mix(r, page.0), mix(g, page.1), mix(b, page.2))
}

/// Channel values of the 6x6x6 color cube in the xterm palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Maps an RGB color to the closest xterm 256-color entry, choosing between
/// the color cube (16..=231) and the gray ramp (232..=255).
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    let cube_index = |c: u8| {
        CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| (i32::from(**level) - i32::from(c)).abs())
            .map_or(0, |(i, _)| i as u8)
    };
    let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (
        CUBE_LEVELS[usize::from(ri)],
        CUBE_LEVELS[usize::from(gi)],
        CUBE_LEVELS[usize::from(bi)],
    );

    let mean = (i32::from(r) + i32::from(g) + i32::from(b)) / 3;
    let gray_step = ((mean - 8 + 5) / 10).clamp(0, 23) as u8;
    let gray_level = 8 + 10 * gray_step;

    if distance((r, g, b), (gray_level, gray_level, gray_level)) < distance((r, g, b), cube) {
        232 + gray_step
    } else {
        16 + 36 * ri + 6 * gi + bi
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> i32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2);
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_to_string(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_derive_json() {
        let output = run_to_string(&["labelkit", "derive", "#999", "--mode", "light"]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["derived"]["background"], "rgb(153,153,153)");
        assert_eq!(value["style"]["--label-r"], "153");
    }

    #[test]
    fn test_derive_invalid_color_fails() {
        let cli = Cli::try_parse_from(["labelkit", "derive", "nope", "--mode", "dark"]).unwrap();
        assert!(run(&cli, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_token_with_flags_file() {
        let mut flags = tempfile::NamedTempFile::new().unwrap();
        writeln!(flags, "css_modules_ga: true").unwrap();
        let path = flags.path().to_str().unwrap();

        let output = run_to_string(&["labelkit", "token", "bug", "--mode", "light", "--flags", path]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["className"], "LabelToken");
        assert_eq!(value["style"]["--label-r"], "153");
    }

    #[test]
    fn test_token_swatch_lists_colors() {
        let output = run_to_string(&[
            "labelkit", "token", "x", "--fill", "#000", "--mode", "dark", "--format", "swatch",
        ]);
        assert!(output.contains("background  rgba(0,0,0,0.18)"));
        assert!(output.contains("text        hsl(0,0%,60%)"));
    }

    #[test]
    fn test_blend_over_page() {
        let translucent = CssColor::Rgba { r: 0, g: 0, b: 0, a: 0.5 };
        assert_eq!(blend(&translucent, (255, 255, 255)), (128, 128, 128));
        let solid = CssColor::Rgb { r: 9, g: 105, b: 218 };
        assert_eq!(blend(&solid, DARK_PAGE), (9, 105, 218));
    }

    #[test]
    fn test_rgb_to_ansi256() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
    }

    #[test]
    fn test_rgb_to_ansi256_prefers_closer_gray() {
        // 128 sits exactly on a gray-ramp step; the nearest cube gray is 135.
        assert_eq!(rgb_to_ansi256((128, 128, 128)), 244);
        // A saturated blue lands in the cube.
        assert_eq!(rgb_to_ansi256((9, 105, 218)), 16 + 6 + 4);
    }
}
