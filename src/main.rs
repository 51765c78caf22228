use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tulipa_mouse::{
    app::{self, Action, App},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    export,
    filter::FilterSettings,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::Session,
    summary::{Summary, MIN_SAMPLES},
    ui,
};

const TICK_RATE_MS: u64 = 100;

/// mouse-movement visualizer with tremor index and usability score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Move the mouse over the terminal canvas while recording to get a live tremor index, a 0-100 smoothness score and a session analysis. Recordings can be exported to CSV and re-analysed headlessly."
)]
pub struct Cli {
    /// smoothing applied to captured positions, in percent (0 disables)
    #[clap(short = 's', long)]
    smoothing: Option<u8>,

    /// ignore movements smaller than this radius, in px (0 disables)
    #[clap(short = 'd', long)]
    dead_zone: Option<f64>,

    /// ignore movements slower than this, in px/s (0 disables)
    #[clap(short = 'v', long)]
    velocity_threshold: Option<f64>,

    /// directory for CSV exports
    #[clap(short = 'o', long)]
    export_dir: Option<PathBuf>,

    /// analyse an exported CSV trace and print the results instead of starting the UI
    #[clap(short = 'a', long)]
    analyze: Option<PathBuf>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// log file (defaults to the state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay command line values on the stored config
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(s) = self.smoothing {
            cfg.smoothing_pct = s;
        }
        if let Some(d) = self.dead_zone {
            cfg.dead_zone_px = d;
        }
        if let Some(v) = self.velocity_threshold {
            cfg.velocity_threshold_px_s = v;
        }
        if let Some(dir) = &self.export_dir {
            cfg.export_dir = Some(dir.clone());
        }
        cfg
    }
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(&cli.log_file.clone().unwrap_or_else(AppDirs::log_path))?;

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    if let Some(path) = &cli.analyze {
        return analyze(path, &config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    info!("interactive session started");

    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        if app.handle_event(runner.step()) == Action::Quit {
            break;
        }
    }

    info!(samples = app.session.samples().len(), "interactive session ended");
    Ok(())
}

fn analyze(path: &Path, config: &Config) -> Result<(), Box<dyn Error>> {
    let points = export::read_trace(File::open(path)?)?;
    info!(path = %path.display(), points = points.len(), "analysing trace");

    let (session, summary) = app::analyze_trace(&points, FilterSettings::from(config));
    print_results(&session, &summary);
    Ok(())
}

fn print_results(session: &Session, summary: &Summary) {
    let live = session.live_stats();
    println!("samples:      {}", live.points);
    println!("distance:     {} px", live.distance);
    println!("last speed:   {} px/s", live.speed);
    match live.tremor {
        Some(t) => println!("tremor index: {t:.1}"),
        None => println!("tremor index: —"),
    }
    match session.score() {
        Some(score) => println!("score:        {} ({})", score.value, score.tier),
        None => println!("score:        —"),
    }
    println!();

    match summary {
        Summary::Ready(report) => println!("{report}"),
        Summary::Insufficient { samples } => println!(
            "Not enough data for an analysis: {samples} samples recorded, {MIN_SAMPLES} needed."
        ),
    }
}
