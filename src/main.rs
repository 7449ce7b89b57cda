use std::process::ExitCode;

fn main() -> ExitCode {
    match household_waste::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", household_waste::app::error_report(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
