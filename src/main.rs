//! fb - command-line entry point

use std::process::ExitCode;

use formblocks::cli::{self, Cli};
use formblocks::logging;
use formblocks::ui::output;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbosity());

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
