use std::io::{BufWriter, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use hopframe_core::MotionConfig;
use hopframe_core::config::CONFIG_ENV_VAR;
use hopframe_replay::{Replay, ReplayConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: hopframe-replay <replay.toml> [--summary]");
        return ExitCode::from(2);
    };
    let summary_only = std::env::args().nth(2).is_some_and(|a| a == "--summary");

    let mut config = match ReplayConfig::from_path(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    // A motion file named in the environment overrides the replay's own tuning
    match MotionConfig::from_env() {
        Ok(Some(motion)) => {
            config.motion = motion;
            tracing::info!("motion tuning taken from ${CONFIG_ENV_VAR}");
        },
        Ok(None) => {},
        Err(e) => {
            tracing::error!("${CONFIG_ENV_VAR}: {e}");
            return ExitCode::FAILURE;
        },
    }

    let mut replay = match Replay::new(config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    tracing::info!(%path, "replay starting");

    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut write_err = None;
    let frames = replay.run(|frame| {
        if summary_only || write_err.is_some() {
            return;
        }
        let line = serde_json::to_string(frame).map_err(std::io::Error::from);
        if let Err(e) = line.and_then(|l| writeln!(out, "{l}")) {
            write_err = Some(e);
        }
    });
    if let Some(e) = write_err.or_else(|| out.flush().err()) {
        tracing::error!("failed to write trace: {e}");
        return ExitCode::FAILURE;
    }

    let stage = replay.stage();
    tracing::info!(
        frames,
        x = stage.position.x,
        y = stage.position.y,
        respawns = stage.respawns,
        "replay finished"
    );
    ExitCode::SUCCESS
}
