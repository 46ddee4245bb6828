use site24x7_cli::{
    actions::execute_command,
    commands::{create_cli_command, params::PARAMETER_VERBOSE},
    error_utils::report_error,
};
use tracing_subscriber::EnvFilter;

/// Log directive used by `--verbose`
const VERBOSE_DIRECTIVE: &str = "site24x7_cli=debug,site24x7=debug";

/// Main entry point for the program
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = create_cli_command().get_matches();
    let verbose = matches.get_flag(PARAMETER_VERBOSE);

    // Intialize the logging subsystem
    let filter = if verbose {
        EnvFilter::new(VERBOSE_DIRECTIVE)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute_command(&matches, &mut out).await
    };

    if let Err(e) = result {
        report_error(&e, verbose, &mut std::io::stderr());
        ::std::process::exit(e.exit_code().code());
    }
}
