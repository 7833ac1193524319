use clap::Parser;
use snaplog::cli::{Cli, Command};
use snaplog::config::Config;
use snaplog::{disk, report, scan};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // --verbose wins over RUST_LOG, otherwise RUST_LOG or warnings only
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> snaplog::Result<()> {
    let config = Config::from_cli(cli)?;

    match &cli.command {
        Command::Scan(_) => {
            let snapshot = scan::run(&config.root, config.depth)?;
            let root = config.root.display().to_string();

            if config.json_output {
                println!("{}", report::json::render(&snapshot)?);
            }

            disk::persist_disk_snapshot(&config.history, &root, config.depth, snapshot)?;

            if !config.json_output {
                println!("saved snapshot of {root} to {}", config.history.display());
            }
        }
        Command::Report => report::print(&disk::disk_report(&config.history)?, &config)?,
        Command::Diff => report::print(&disk::disk_diff(&config.history)?, &config)?,
        Command::Advise => report::print(&disk::disk_advise(&config.history)?, &config)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
