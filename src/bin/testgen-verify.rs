//! Connectivity check for the configured Ollama backend.
//!
//! Exits 0 when the model answers with the expected phrase, 1 otherwise.
//!
//! Usage: testgen-verify [-f <config.toml>] [-m <model>]

use std::process::ExitCode;

use local_testgen::config;
use local_testgen::error::AppError;
use local_testgen::llm::ollama::OllamaClient;
use local_testgen::logger;
use local_testgen::probe;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, AppError> {
    let _ = dotenvy::dotenv();

    let mut config_path = None;
    let mut model = None;
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-f" | "--config" => config_path = iter.next(),
            "-m" | "--model" => model = iter.next(),
            "-h" | "--help" => {
                println!("Usage: testgen-verify [-f <config.toml>] [-m <model>]");
                return Ok(true);
            }
            other => return Err(AppError::Config(format!("unexpected argument '{other}'"))),
        }
    }

    let config = config::load(config_path.as_deref())?;
    logger::init_for(&config, None)?;

    let client = OllamaClient::from_config(&config.ollama)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let model = model.unwrap_or_else(|| config.ollama.default_model.clone());

    println!("Testing connection to {} with model '{model}'...", client.api_url());

    let outcome = probe::check(&client, &model).await;
    match &outcome {
        probe::ProbeOutcome::Established { reply } | probe::ProbeOutcome::Unexpected { reply } => {
            println!("Response: {reply}");
        }
        probe::ProbeOutcome::Failed { .. } => {}
    }
    println!("{}", outcome.summary());

    Ok(outcome.is_success())
}
