//! marklabel CLI
//!
//! Shows how label markup resolves into runs and links, and how it wraps and
//! truncates at a given width.

mod font_metrics;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use marklabel::{
    ApproximateFontMetrics, FontMetrics, HtmlLabel, LabelConfig, LineBreakMode, LinkSpan, Point,
    StyledRun, TextLayout,
};
use marklabel_common::warning::{recorded_warnings, set_warnings_enabled};
use marklabel_html::HTMLTokenizer;
use owo_colors::OwoColorize;
use serde::Serialize;

use font_metrics::FontdueFontMetrics;

/// marklabel: inspect rich text label markup
#[derive(Parser, Debug)]
#[command(name = "marklabel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Runs, links, and lines of a file at 320pt
    marklabel label.html

    # Inline markup, two lines at most
    marklabel --html 'click <a href="https://example.com">here</a> now' --lines 2

    # One line, cut in the middle, measured with a real font
    marklabel --html '<b>Very</b> long title' --mode truncate-middle --font ./Inter.ttf

    # Which link is under a point
    marklabel label.html --hit 70,5

    # Everything as JSON
    marklabel label.html --json
"#)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Markup string to use instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Available width in points, insets included
    #[arg(short, long, default_value = "320")]
    width: f32,

    /// Maximum number of lines (0 for unlimited)
    #[arg(short, long)]
    lines: Option<usize>,

    /// word-wrap, truncate-head, truncate-middle, or truncate-tail
    #[arg(short, long)]
    mode: Option<LineBreakMode>,

    /// TrueType font used for measurement (default: a system font)
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// JSON label configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print runs, links, and layout as JSON
    #[arg(long)]
    json: bool,

    /// Hit-test a point, given as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    hit: Option<Point>,

    /// Do not print markup warnings
    #[arg(short, long)]
    quiet: bool,
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but found '{value}'"))?;
    let coordinate = |text: &str| {
        text.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{text}': {e}"))
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        set_warnings_enabled(false);
    }

    let markup = load_markup(&cli)?;
    let config = load_config(&cli)?;

    if cli.tokens {
        print_tokens(&markup);
    }

    if let Some(path) = &cli.font {
        run(&cli, &markup, config, FontdueFontMetrics::from_path(path)?)
    } else if let Some(metrics) = FontdueFontMetrics::from_system() {
        run(&cli, &markup, config, metrics)
    } else {
        run(&cli, &markup, config, ApproximateFontMetrics)
    }
}

/// Load markup from CLI arguments
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
    } else {
        bail!("a markup file or --html is required")
    }
}

/// The config file, if any, with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<LabelConfig> {
    let mut config = match &cli.config {
        Some(path) => LabelConfig::from_path(path)?,
        None => LabelConfig::default(),
    };
    if let Some(lines) = cli.lines {
        config.max_lines = lines;
    }
    if let Some(mode) = cli.mode {
        config.line_break_mode = mode;
    }
    Ok(config)
}

fn print_tokens(markup: &str) {
    let mut tokenizer = HTMLTokenizer::new(markup);
    tokenizer.run();
    let issues = tokenizer.issues().to_vec();

    println!("{}", "=== Tokens ===".bold());
    for token in tokenizer.into_tokens() {
        println!("  {token}");
    }
    for issue in issues {
        println!(
            "  {} {} at byte {}",
            "parse error:".yellow(),
            issue.message,
            issue.position
        );
    }
    println!();
}

#[derive(Serialize)]
struct Report<'a> {
    plain_text: &'a str,
    runs: &'a [StyledRun],
    links: &'a [LinkSpan],
    layout: &'a TextLayout,
    lines: Vec<String>,
    warnings: Vec<String>,
}

fn run<M: FontMetrics>(cli: &Cli, markup: &str, config: LabelConfig, metrics: M) -> Result<()> {
    let mut label = HtmlLabel::new(metrics);
    label.set_config(config);
    label.set_width(cli.width);
    label.set_text(markup);

    let hit = cli.hit.map(|point| {
        let index = label.layout().character_index_at(point);
        (point, index, label.link_at(point))
    });

    let plain_text = label.plain_text().to_string();
    let runs = label.runs().to_vec();
    let links = label.links().to_vec();
    let layout = label.layout();
    let lines: Vec<String> = (0..layout.line_count())
        .filter_map(|index| layout.line_text(&plain_text, index))
        .collect();

    if cli.json {
        let report = Report {
            plain_text: &plain_text,
            runs: &runs,
            links: &links,
            layout,
            lines,
            warnings: recorded_warnings(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "=== Runs ===".bold());
    for run in &runs {
        let mut traits = Vec::new();
        if run.attributes.font.bold {
            traits.push("bold".to_string());
        }
        if run.attributes.font.italic {
            traits.push("italic".to_string());
        }
        if run.attributes.link.is_some() {
            traits.push("link".to_string());
        }
        traits.push(format!("{}pt", run.attributes.font.size));
        traits.push(run.attributes.color.to_string());
        println!(
            "  {:>3}..{:<3} {} {}",
            run.range.start,
            run.range.end,
            format!("{:?}", run.text).green(),
            traits.join(" ").dimmed()
        );
    }

    println!("\n{}", "=== Links ===".bold());
    if links.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for link in &links {
        println!(
            "  {:>3}..{:<3} {}",
            link.range.start,
            link.range.end,
            link.url.cyan().underline()
        );
    }

    println!(
        "\n{} {}",
        "=== Lines ===".bold(),
        format!("({} x {})", layout.size.width, layout.size.height).dimmed()
    );
    for (record, text) in layout.lines.iter().zip(&lines) {
        let marker = if record.is_truncated() {
            "…".yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {marker} y={:<7.1} x={:<7.1} w={:<7.1} {:?}",
            record.y, record.x, record.width, text
        );
    }

    if let Some((point, index, link)) = hit {
        println!("\n{}", "=== Hit ===".bold());
        println!("  point: ({}, {})", point.x, point.y);
        match index {
            Some(index) => println!("  character boundary: {index}"),
            None => println!("  character boundary: {}", "(outside text)".dimmed()),
        }
        match link {
            Some(link) => println!("  link: {}", link.url.cyan().underline()),
            None => println!("  link: {}", "(none)".dimmed()),
        }
    }

    let warnings = recorded_warnings();
    if !warnings.is_empty() && !cli.quiet {
        println!("\n{}", "=== Warnings ===".bold());
        for warning in warnings {
            println!("  - {}", warning.yellow());
        }
    }

    Ok(())
}
