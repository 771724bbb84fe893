// Tally - production-count journal (interactive console)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tally_cli::shell::Shell;
use tally_config::Settings;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record per-line production counts in an editable table")]
#[command(version)]
struct Cli {
    /// Journal to open (.json). Starts with a new table if omitted or unreadable.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = Settings::load();
    log::debug!("settings: {:?}", settings);

    let (editor, notices) = tally_cli::initial_editor(cli.file.as_deref(), &settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(editor, settings, stdin.lock(), stdout.lock());

    let result = notices
        .iter()
        .try_for_each(|n| shell.notify(n))
        .and_then(|()| shell.run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(io::stderr(), "tally: {e}");
            ExitCode::FAILURE
        }
    }
}
