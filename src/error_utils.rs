//! Error handling utilities for the Site24x7 CLI.
//!
//! This module keeps error and warning reporting uniform across commands.

use std::error::Error;
use std::io::Write;

use color_print::cformat;
use console::Term;
use tracing::debug;

use crate::error::CliError;

/// Report a command failure on `out`.
///
/// The message is printed in red, followed by a hint when the error has one.
/// In verbose mode the chain of underlying causes and the debug
/// representation are printed as well.
pub fn report_error(error: &CliError, verbose: bool, out: &mut dyn Write) {
    debug!("{:?}", error);

    // Nothing sensible is left to do if stderr itself is gone.
    let _ = writeln!(out, "{}", stderr_styled(cformat!("<red>Error: {}</red>", error)));

    if let Some(hint) = error.hint() {
        let _ = writeln!(out, "{}", hint);
    }

    if verbose {
        for (depth, cause) in error_chain(error).iter().enumerate().skip(1) {
            let _ = writeln!(
                out,
                "{}",
                stderr_styled(cformat!("<red>  {}: caused by: {}</red>", depth, cause))
            );
        }
        let _ = writeln!(out, "{}", stderr_styled(cformat!("<red>{:#?}</red>", error)));
    }
}

/// Report a warning consistently with both logging and user-facing output.
pub fn report_warning<E: std::fmt::Display + ?Sized>(warning: &E) {
    tracing::warn!("{}", warning);
    eprintln!("{}", stderr_styled(cformat!("<yellow>Warning: {}</yellow>", warning)));
}

/// Keep the ANSI escapes in `text` only when `colors` is set
pub fn styled(text: String, colors: bool) -> String {
    if colors {
        text
    } else {
        console::strip_ansi_codes(&text).into_owned()
    }
}

/// Styled text for stdout, plain when stdout is not a color terminal
pub fn stdout_styled(text: String) -> String {
    styled(text, Term::stdout().features().colors_supported())
}

/// Styled text for stderr, plain when stderr is not a color terminal
pub fn stderr_styled(text: String) -> String {
    styled(text, Term::stderr().features().colors_supported())
}

/// Messages of `error` and all of its sources, outermost first
pub fn error_chain(error: &dyn Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}
