use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;

use procwatch::app::App;
use procwatch::config::{self, load_config, load_config_from_path};
use procwatch::event::{Event, EventHandler};
use procwatch::system::procfs::ProcfsSource;
use procwatch::ui;

#[derive(Parser)]
#[command(
    name = "procwatch",
    about = "Terminal process monitor with a ranked, color-banded table"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Initial sort metric: cpu, mem
    #[arg(long)]
    sort: Option<String>,

    /// Run headless performance capture without interactive terminal.
    #[arg(long, default_value_t = false)]
    perf_capture: bool,

    /// Number of capture iterations for perf mode.
    #[arg(long, default_value_t = 120)]
    perf_iterations: usize,

    /// Headless terminal width for perf mode.
    #[arg(long, default_value_t = 160)]
    perf_width: u16,

    /// Headless terminal height for perf mode.
    #[arg(long, default_value_t = 50)]
    perf_height: u16,

    /// Perf tracing output file (JSON lines).
    #[arg(long, default_value = "target/perf/perf_spans.jsonl")]
    perf_output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if cli.perf_capture {
        return run_perf_capture(config, &cli);
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms);
    let mut app = App::new(ProcfsSource::new(), &config);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind != crossterm::event::KeyEventKind::Press {
                        continue;
                    }
                    let action = app.map_key(key);
                    app.dispatch(action);
                }
                // refresh_data is a no-op while a modal state holds the loop
                Event::Tick => app.refresh_data(),
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }

    config
}

fn run_perf_capture(config: config::Config, cli: &Cli) -> Result<()> {
    #[cfg(not(feature = "perf-tracing"))]
    {
        let _ = (config, cli);
        Err(eyre!(
            "--perf-capture requires the `perf-tracing` feature; run with `cargo run --features perf-tracing -- --perf-capture`"
        ))
    }

    #[cfg(feature = "perf-tracing")]
    {
        use procwatch::perf;

        if cli.perf_iterations == 0 {
            return Err(eyre!("--perf-iterations must be greater than 0"));
        }
        if cli.perf_width == 0 || cli.perf_height == 0 {
            return Err(eyre!(
                "--perf-width and --perf-height must be greater than 0"
            ));
        }

        if cli.perf_output.exists() {
            std::fs::remove_file(&cli.perf_output)?;
        }
        perf::init_tracing_json(&cli.perf_output)?;

        let mut app = App::new(ProcfsSource::new(), &config);
        let backend = ratatui::backend::TestBackend::new(cli.perf_width, cli.perf_height);
        let mut terminal = ratatui::Terminal::new(backend)?;

        for _ in 0..cli.perf_iterations {
            app.refresh_data();
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }

        println!("Perf capture ({} iterations):", cli.perf_iterations);
        println!("{}", perf::summarize_span_log(&cli.perf_output)?);
        println!("span log: {}", cli.perf_output.display());
        Ok(())
    }
}
