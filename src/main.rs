use std::process::ExitCode;

fn main() -> ExitCode {
    match screenshot_agent_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("screenshot-agent: {e}");
            ExitCode::FAILURE
        }
    }
}
