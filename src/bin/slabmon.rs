//! slabmon - display kernel slab cache information.
//!
//! Continuous mode (default) refreshes an interactive table every few
//! seconds; `--once` prints a single snapshot to stdout and exits. Reading
//! `/proc/slabinfo` typically requires root.

use std::io;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use slabmon::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use slabmon::collector::MockFs;
use slabmon::collector::{DEFAULT_MAX_CACHES, SlabCollector, SlabNodes};
use slabmon::oneshot::run_once;
use slabmon::sort::SortField;
use slabmon::tui::App;

const SORT_HELP: &str = "\
The following are valid sort criteria:
 a: sort by number of active objects
 b: sort by objects per slab
 c: sort by cache size
 l: sort by number of slabs
 v: sort by (non display) number of active slabs
 n: sort by name
 o: sort by number of objects (the default)
 p: sort by (non display) pages per slab
 s: sort by object size
 u: sort by cache utilization";

/// Display kernel slab cache information.
#[derive(Parser)]
#[command(name = "slabmon", version, about, after_help = SORT_HELP)]
struct Args {
    /// Delay between updates in seconds.
    #[arg(short, long, value_name = "SECS", default_value_t = 3,
          value_parser = clap::value_parser!(u64).range(1..))]
    delay: u64,

    /// Display the output once and then exit.
    #[arg(short, long)]
    once: bool,

    /// Specify sort criteria by character (see below).
    #[arg(short, long, value_name = "CHAR")]
    sort: Option<char>,

    /// Path to the proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Maximum number of caches held for display.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CACHES)]
    max_caches: usize,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    let sort = args.sort.map(SortField::from_key).unwrap_or_default();

    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    #[cfg(not(target_os = "linux"))]
    let fs = MockFs::typical_system();

    let collector = match SlabCollector::open(fs, &args.proc_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("slabmon: {}", e);
            std::process::exit(1);
        }
    };

    if args.once {
        let mut nodes = SlabNodes::with_capacity(args.max_caches);
        let mut stdout = io::stdout();
        if let Err(e) = run_once(&collector, &mut nodes, sort, &mut stdout) {
            eprintln!("slabmon: {}", e);
            std::process::exit(1);
        }
    } else {
        let app = App::new(collector, sort, args.max_caches);
        if let Err(e) = app.run(Duration::from_secs(args.delay)) {
            eprintln!("slabmon: {}", e);
            std::process::exit(1);
        }
    }
}
