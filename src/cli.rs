//! Command-line front end: a JSON diagram description in, an SVG document out.
//!
//! ```text
//! hemicycle diagram.json -o diagram.svg
//! hemicycle diagram.json --print
//! ```
//!
//! The JSON object holds the layout and rendering parameters plus an
//! `attrib` array of groups:
//!
//! ```json
//! {
//!     "span_angle": 160,
//!     "filling_strategy": "empty_inner",
//!     "attrib": [
//!         {"data": "Left", "color": "#c00", "nseats": 12},
//!         {"data": "Right", "color": "navy", "border_size": 0.2, "nseats": 9}
//!     ]
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::apportion::FillingStrategy;
use crate::color::Paint;
use crate::geometry::DEFAULT_SPAN_ANGLE;
use crate::layout::LayoutConfig;
use crate::svg::{Margins, RenderError, SeatGroup, SvgOptions, render_attribution, write_svg};

/// Generate arch-like parliament diagrams.
#[derive(Parser, Debug, Clone)]
#[command(name = "hemicycle", version, about)]
#[command(group(
    ArgGroup::new("destination")
        .args(["output", "print"])
        .required(true)
        .multiple(true)
))]
pub struct Args {
    /// JSON file with the diagram parameters and an `attrib` array of groups
    /// (`data`, `color`, optional `border_size`, `border_color`, `id`, and
    /// `nseats`, defaulting to 1).
    pub input: PathBuf,

    /// File to write the SVG document to (created or truncated).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the SVG document to standard output, even with --output.
    #[arg(short, long)]
    pub print: bool,

    /// Log debug details to standard error.
    #[arg(short, long)]
    pub verbose: bool,
}

/// One group of seats as written in the JSON input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupInput {
    /// Label of the group.
    pub data: String,
    /// Fill color.
    pub color: String,
    #[serde(default)]
    pub border_size: f64,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default = "default_nseats")]
    pub nseats: u32,
}

/// Margins as a single number, `[horizontal, vertical]`, or
/// `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MarginsInput {
    Uniform(f64),
    Symmetric([f64; 2]),
    Sides([f64; 4]),
}

impl From<MarginsInput> for Margins {
    fn from(input: MarginsInput) -> Self {
        match input {
            MarginsInput::Uniform(m) => Margins::uniform(m),
            MarginsInput::Symmetric([h, v]) => Margins::symmetric(h, v),
            MarginsInput::Sides([l, t, r, b]) => Margins::new(l, t, r, b),
        }
    }
}

/// The whole JSON input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramInput {
    pub attrib: Vec<GroupInput>,
    #[serde(default)]
    pub min_rows: u32,
    #[serde(default)]
    pub max_rows: Option<u32>,
    #[serde(default = "default_span_angle")]
    pub span_angle: f64,
    #[serde(default = "default_seat_radius_factor")]
    pub seat_radius_factor: f64,
    #[serde(default)]
    pub filling_strategy: FillingStrategy,
    #[serde(default)]
    pub canvas_size: Option<f64>,
    #[serde(default)]
    pub margins: Option<MarginsInput>,
    #[serde(default)]
    pub write_number_of_seats: Option<bool>,
    #[serde(default)]
    pub font_size_factor: Option<f64>,
}

fn default_border_color() -> String {
    String::from("#000")
}

fn default_nseats() -> u32 {
    1
}

fn default_span_angle() -> f64 {
    DEFAULT_SPAN_ANGLE
}

/// Diagrams read better with a little space between seats.
fn default_seat_radius_factor() -> f64 {
    0.8
}

impl DiagramInput {
    /// Parse the JSON input.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid diagram description")
    }

    /// Layout parameters. The seat count is filled in from the groups.
    pub fn layout_config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default()
            .min_rows(self.min_rows)
            .span_angle(self.span_angle)
            .seat_radius_factor(self.seat_radius_factor)
            .filling_strategy(self.filling_strategy);
        config.max_rows = self.max_rows;
        config
    }

    /// Rendering options, defaults filled in.
    pub fn svg_options(&self) -> SvgOptions {
        let defaults = SvgOptions::default();
        SvgOptions {
            canvas_size: self.canvas_size.unwrap_or(defaults.canvas_size),
            margins: self.margins.map_or(defaults.margins, Margins::from),
            write_number_of_seats: self
                .write_number_of_seats
                .unwrap_or(defaults.write_number_of_seats),
            font_size_factor: self.font_size_factor.unwrap_or(defaults.font_size_factor),
        }
    }

    /// Groups with their seat counts, in input order. Empty groups are dropped.
    pub fn groups(&self) -> Result<Vec<(SeatGroup, u32)>, RenderError> {
        self.attrib
            .iter()
            .filter(|group| group.nseats > 0)
            .map(|group| -> Result<(SeatGroup, u32), RenderError> {
                let mut seat_group = SeatGroup::new(group.data.clone(), Paint::parse(&group.color)?)
                    .border(group.border_size, Paint::parse(&group.border_color)?);
                seat_group.id = group.id;
                Ok((seat_group, group.nseats))
            })
            .collect()
    }

    /// Compute the layout and render the SVG document.
    pub fn render(&self) -> Result<String, RenderError> {
        let groups = self.groups()?;
        tracing::debug!(groups = groups.len(), "rendering diagram");
        render_attribution(&groups, &self.layout_config(), &self.svg_options())
    }
}

/// Log to standard error. `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hemicycle=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hemicycle=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Read the input file, render it, and write the result where asked.
pub fn run(args: &Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let input = DiagramInput::from_json(&text)
        .with_context(|| format!("in {}", args.input.display()))?;
    let svg = input.render().context("cannot render diagram")?;

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        write_svg(BufWriter::new(file), &svg)
            .with_context(|| format!("cannot write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote diagram");
    }
    if args.print {
        write_svg(io::stdout().lock(), &svg).context("cannot write to standard output")?;
    }

    Ok(())
}
