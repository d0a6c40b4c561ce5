mod cli;
mod error;
mod fmt;
mod i18n;
mod importer;
mod logging;
mod models;
mod reports;
mod schema;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let ctx = Context::resolve(cli.master.as_deref(), cli.lang);

    let result = match cli.command {
        Commands::Init {
            data_dir,
            language,
            currency,
        } => cli::init::run(data_dir, language, currency),
        Commands::Import { file, dry_run } => cli::import::run(&ctx, &file, dry_run),
        Commands::Report { command } => cli::report::run(&ctx, command),
        Commands::Status => cli::status::run(&ctx),
        Commands::Demo { output } => cli::demo::run(output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
