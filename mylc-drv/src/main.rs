use clap::Parser as _;
use mylc_drv::{Config, Session};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let config = Config::parse();
    init_tracing(config.verbose);

    let mut session = Session::new(config);
    if let Err(err) = session.compile() {
        tracing::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}
