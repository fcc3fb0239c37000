use std::process::ExitCode;

fn main() -> ExitCode {
    parsedoc::cli::run()
}
