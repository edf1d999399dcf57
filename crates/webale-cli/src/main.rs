//! webale CLI entry point.

use clap::Parser;
use webale_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    ui::init(args.no_color, args.quiet);
    let color = ui::colors_enabled();
    logger::init_logger(args.verbose, args.quiet, color);

    let _ = miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .color(color)
                .wrap_lines(false)
                .build(),
        )
    }));

    if let Err(err) = commands::build_execute(args).await {
        let code = err.exit_code();
        eprintln!("{:?}", error::cli_error_to_miette(err));
        std::process::exit(code);
    }
}
