use clap::Parser;

use stockcast_cli::args::Cli;
use stockcast_cli::commands;
use stockcast_cli::dto::ErrorResponse;

fn main() {
    let cli = Cli::parse();
    stockcast_observability::init_with(cli.log_format.into());

    let (document, exit_code) = match commands::run(&cli.command) {
        Ok(document) => (document, 0),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            (
                serde_json::to_value(ErrorResponse::new(format!("{e:#}"))).unwrap_or_default(),
                1,
            )
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "failed to render output");
            std::process::exit(1);
        }
    }
    std::process::exit(exit_code);
}
