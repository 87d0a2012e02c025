mod cli;
mod lib;
mod load;

use cli::{args::Config, menu::Session};

fn main() {
    let config = Config::from_args();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    tracing::debug!(?config, "starting");

    let mut errs = load::error::Record::new();
    let entries = load::read_entries(&config.journal, &mut errs);
    print!("{}", errs);
    let log = match entries {
        Some(log) => log,
        // never overwrite a journal that could not be read
        None => std::process::exit(1),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), log, config);
    if let Err(e) = session.run() {
        tracing::error!(error = %e, "terminal unavailable");
        std::process::exit(1);
    }
}
