use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use tracing::info;

use sleuth_core::CaseGenerator;
use sleuth_engine::{
    Backend, EngineConfig, GameState, LineKind, OfflineOracle, Oracle, Output, Session,
};

pub struct PlayOptions {
    pub seed: u64,
    pub oracle_url: Option<String>,
    pub oracle_model: Option<String>,
    pub oracle_timeout_secs: u64,
    pub offline: bool,
    pub save: Option<PathBuf>,
    pub resume: Option<PathBuf>,
}

pub fn run(opts: PlayOptions) -> Result<(), String> {
    let mut config = EngineConfig::default()
        .with_seed(opts.seed)
        .with_timeout(Duration::from_secs(opts.oracle_timeout_secs));
    if !opts.offline {
        if let Some(url) = &opts.oracle_url {
            config = config.with_oracle_url(url.clone());
        }
        if let Some(model) = &opts.oracle_model {
            config = config.with_oracle_model(model.clone());
        }
    }

    let state = match &opts.resume {
        Some(path) => load(path)?,
        None => GameState::new(),
    };

    let backend = if opts.offline {
        Backend::Offline(OfflineOracle)
    } else {
        Backend::from_config(&config).map_err(|e| format!("failed to configure oracle: {e}"))?
    };
    let mode = match backend {
        Backend::Http(_) => "online",
        Backend::Offline(_) => "offline",
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    info!(seed = opts.seed, oracle = mode, resumed = opts.resume.is_some(), "session starting");
    let session = Session::resume(state, &config, CaseGenerator::default(), backend);

    println!("  {} Sleuth investigation terminal", "Connected".bold());
    println!("  Seed: {} | Oracle: {mode}", opts.seed);
    println!("  Type 'start-case' to begin, 'help' for commands, 'quit' to exit.\n");

    let state = runtime.block_on(repl(session))?;

    if let Some(path) = &opts.save {
        save(path, &state)?;
        println!("Session saved to {}", path.display());
    }
    Ok(())
}

async fn repl<O: Oracle>(mut session: Session<O>) -> Result<GameState, String> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let raw = line.trim_end_matches(['\r', '\n']);
        let input = raw.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!("Disconnecting.");
            break;
        }

        if let Some(output) = session.submit(raw).await {
            print_output(&output);
        }
    }

    Ok(session.into_state())
}

fn print_output(output: &Output) {
    if output.delta.clear_screen {
        print!("\x1B[2J\x1B[1;1H");
    }
    for line in &output.lines {
        let text = line.text.as_str();
        match line.kind {
            LineKind::InputEcho => println!("{}", text.dimmed()),
            LineKind::Info => println!("{text}"),
            LineKind::SystemBanner => println!("{}", text.cyan().bold()),
            LineKind::Error => println!("{}", text.red()),
            LineKind::Success => println!("{}", text.green()),
            LineKind::Warning => println!("{}", text.yellow()),
            LineKind::Enrichment => println!("{} {}", ">>".magenta(), text.magenta()),
        }
    }
    println!();
}

fn load(path: &Path) -> Result<GameState, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid session file {}: {e}", path.display()))
}

fn save(path: &Path, state: &GameState) -> Result<(), String> {
    let json = serde_json::to_string_pretty(state).map_err(|e| format!("JSON error: {e}"))?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
