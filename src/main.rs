use std::process::ExitCode;

fn main() -> ExitCode {
    cs_digest::run()
}
