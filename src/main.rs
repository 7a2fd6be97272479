use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tallypad::eval::FastevalEvaluator;
use tallypad::storage::{FileStorage, MemoryStorage};
use tallypad::theme::Theme;
use tallypad::ui::App;

/// A keystroke-driven terminal calculator with history and themes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the persisted history and theme flag
    /// (defaults to `tallypad` inside the platform data directory).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start with this theme instead of the persisted flag.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Keep history and theme in memory only.
    #[arg(long)]
    no_persist: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they can be redirected away from the screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let theme = args.theme.map(Theme::from);

    if args.no_persist {
        let mut app = App::new(FastevalEvaluator, MemoryStorage::new(), theme);
        return app.run();
    }

    let root = match args.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("no platform data directory; pass --data-dir or --no-persist")?
            .join("tallypad"),
    };
    let mut app = App::new(FastevalEvaluator, FileStorage::new(root), theme);
    app.run()
}
