use std::process::ExitCode;

fn main() -> ExitCode {
    match databar::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("databar: {e}");
            ExitCode::FAILURE
        }
    }
}
