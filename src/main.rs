use std::process::ExitCode;

fn main() -> ExitCode {
    kss_guide::cli::run()
}
