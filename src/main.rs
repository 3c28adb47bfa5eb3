use clap::{Parser, Subcommand};
use imgopty::config::{self, BenchConfig};
use imgopty::imaging::RustCodec;
use imgopty::process::{BatchEvent, Strategy};
use imgopty::{bench, output, process};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

#[derive(Parser)]
#[command(name = "imgopty")]
#[command(about = "Batch image resizer with a sequential vs parallel benchmark")]
#[command(long_about = "\
Batch image resizer with a sequential vs parallel benchmark

Every .jpg, .jpeg and .png file directly inside the source directory is
resized to 1080p, 720p and 480p, keeping its aspect ratio. The comparison
runs the whole directory sequentially, then in parallel, and writes both
durations to the report file.

Default layout (relative to --root):

  Images/                # Source images (created if missing, not recursive)
  ImageSequential/       # Output of the sequential run
  ImageParallel/         # Output of the parallel run
  README.md              # Timing report (overwritten)
  imgopty.toml           # Optional config overriding the paths above

Output files are named {stem}_{height}p{ext}, e.g. dawn.jpg → dawn_720p.jpg.

Run 'imgopty gen-config' to generate a documented imgopty.toml.")]
#[command(version)]
struct Cli {
    /// Project root holding imgopty.toml and the default directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run sequentially, then in parallel, and write the timing report (default)
    Compare,
    /// Run only the sequential strategy
    Sequential,
    /// Run only the parallel strategy
    Parallel,
    /// List which source files would be processed and which are skipped
    Check,
    /// Print a stock imgopty.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Compare) {
        Command::Compare => {
            let config = config::load_config(&cli.root)?;
            init_thread_pool(&config.processing);
            let (tx, printer) = spawn_printer();
            let result = bench::run_comparison(&RustCodec::new(), &config, Some(&tx));
            finish_printer(tx, printer);
            let report = result?;
            output::print_report(&report);
        }
        Command::Sequential => {
            let config = config::load_config(&cli.root)?;
            run_single(&config, Strategy::Sequential)?;
        }
        Command::Parallel => {
            let config = config::load_config(&cli.root)?;
            init_thread_pool(&config.processing);
            run_single(&config, Strategy::Parallel)?;
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            let listing = process::list_source(&config.source_dir)?;
            output::print_check_output(&listing, &config.source_dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run one strategy with progress output, without writing a report.
fn run_single(config: &BenchConfig, strategy: Strategy) -> Result<(), bench::BenchError> {
    let (tx, printer) = spawn_printer();
    let result = bench::run_strategy(&RustCodec::new(), config, strategy, Some(&tx));
    finish_printer(tx, printer);
    result.map(|_| ())
}

/// Start the thread that prints batch events as they arrive.
fn spawn_printer() -> (Sender<BatchEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_batch_event(&event);
        }
    });
    (tx, printer)
}

/// Close the event channel and wait for the printer to drain it.
fn finish_printer(tx: Sender<BatchEvent>, printer: JoinHandle<()>) {
    drop(tx);
    if printer.join().is_err() {
        tracing::warn!("progress printer thread panicked");
    }
}

/// Install the stderr diagnostics subscriber.
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
