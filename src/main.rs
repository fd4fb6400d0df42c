use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::rendering::{self, snapshot::TextSnapshot};
use folio::{HeadlessPage, PageConfig, Portfolio, Viewport};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio", version, about = "Render and exercise the portfolio page headlessly")]
struct Cli {
    /// Portfolio content JSON (defaults to the built-in profile)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Page configuration JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the viewport, e.g. 1280x720
    #[arg(long, global = true, value_parser = parse_viewport)]
    viewport: Option<Viewport>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the page as HTML
    Render {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Section to highlight in the navigation rail
        #[arg(long)]
        active: Option<String>,
    },
    /// Print the document-space box of every section
    Layout,
    /// Print the page title, text digest and text
    Snapshot,
    /// Scroll top to bottom and print the tracker and progress bar per frame
    Simulate {
        /// Pixels scrolled per frame
        #[arg(long, default_value_t = 120.0)]
        step: f64,
        /// Frames per second driving the spring
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Extra frames after the last scroll to let the bar settle
        #[arg(long, default_value_t = 90)]
        settle_frames: u32,
    },
}

fn parse_viewport(s: &str) -> std::result::Result<Viewport, String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok(Viewport { width, height })
}

fn load(cli: &Cli) -> Result<(Portfolio, PageConfig)> {
    let portfolio = match &cli.content {
        Some(path) => Portfolio::from_json_file(path)
            .with_context(|| format!("loading content from {}", path.display()))?,
        None => Portfolio::default(),
    };
    let mut config = match &cli.config {
        Some(path) => PageConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PageConfig::default(),
    };
    if let Some(v) = cli.viewport {
        config.viewport = v;
        config.validate()?;
    }
    Ok((portfolio, config))
}

fn render(cli: &Cli, out: Option<&PathBuf>, active: Option<&str>) -> Result<()> {
    let (portfolio, config) = load(cli)?;
    let mut state = config.initial_render_state();
    if let Some(id) = active {
        anyhow::ensure!(config.sections.contains(id), "unknown section '{}'", id);
        state.active_section = id.to_string();
    }
    let html = rendering::render_page(&portfolio, &config.sections, &state);
    match out {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn layout(cli: &Cli) -> Result<()> {
    let (portfolio, config) = load(cli)?;
    let html = rendering::render_page(&portfolio, &config.sections, &config.initial_render_state());
    let page = HeadlessPage::from_html(&html, config.viewport)?;
    println!("viewport {}x{}", config.viewport.width, config.viewport.height);
    for b in &page.layout().boxes {
        println!(
            "{:<12} top {:>8.1}  bottom {:>8.1}  height {:>7.1}",
            b.id.as_deref().unwrap_or("(footer)"),
            b.rect.top(),
            b.rect.bottom(),
            b.rect.height
        );
    }
    println!("document height {:.1}, max scroll {:.1}", page.document_height(), page.max_scroll());
    Ok(())
}

fn snapshot(cli: &Cli) -> Result<()> {
    let (portfolio, config) = load(cli)?;
    let html = rendering::render_page(&portfolio, &config.sections, &config.initial_render_state());
    let snap = TextSnapshot::from_html(&html)?;
    println!("Title: {}", snap.title);
    println!("Digest: {}", snap.digest());
    println!("{}", "-".repeat(60));
    println!("{}", snap.text);
    Ok(())
}

fn simulate(cli: &Cli, step: f64, fps: f64, settle_frames: u32) -> Result<()> {
    anyhow::ensure!(step > 0.0 && step.is_finite(), "--step must be positive");
    anyhow::ensure!(fps > 0.0 && fps.is_finite(), "--fps must be positive");
    let (portfolio, config) = load(cli)?;
    let (mut page, view) = folio::open(portfolio, config)?;
    let dt = 1.0 / fps;

    println!("{:>6} {:>9} {:>7} {:>8}  {}", "frame", "scroll_y", "raw", "bar", "active");
    let mut frame = 0u32;
    let print_frame = |page: &HeadlessPage, frame: u32| {
        println!(
            "{:>6} {:>9.1} {:>7.3} {:>8.4}  {}",
            frame,
            page.scroll_y(),
            view.raw_progress(),
            view.progress_scale(),
            view.active_section()
        );
    };

    while page.scroll_y() < page.max_scroll() {
        page.advance_clock(dt * 1000.0);
        page.scroll_by(step);
        view.tick(dt);
        frame += 1;
        print_frame(&page, frame);
    }
    for _ in 0..settle_frames {
        page.advance_clock(dt * 1000.0);
        view.tick(dt);
        frame += 1;
        if view.progress_settled() {
            break;
        }
    }
    print_frame(&page, frame);
    println!("settled: {}", view.progress_settled());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Render { out, active } => render(&cli, out.as_ref(), active.as_deref()),
        Command::Layout => layout(&cli),
        Command::Snapshot => snapshot(&cli),
        Command::Simulate {
            step,
            fps,
            settle_frames,
        } => simulate(&cli, *step, *fps, *settle_frames),
    }
}
