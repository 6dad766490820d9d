//! local-testgen — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config
//!   4. Resolve effective log level (CLI `-v` flags > env > config)
//!   5. Init logger once
//!   6. Build the generation adapter
//!   7. Run the selected front end (serve, chat or generate)

use std::process::ExitCode;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use local_testgen::config::{self, Config};
use local_testgen::error::AppError;
use local_testgen::generator::TestCaseGenerator;
use local_testgen::logger;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, AppError> {
    // Load .env if present — the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args()?;

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = logger::init_for(&config, args.log_level)?;

    info!(
        api_url = %config.ollama.api_url,
        default_model = %config.ollama.default_model,
        timeout_seconds = config.ollama.timeout_seconds,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let generator = TestCaseGenerator::from_config(&config.ollama)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let generator = Arc::new(generator);

    match args.mode {
        Mode::Generate { text, model } => {
            let envelope = generator.generate(&text, model.as_deref()).await;
            let json = serde_json::to_string_pretty(&envelope)
                .map_err(|e| AppError::Server(format!("failed to encode envelope: {e}")))?;
            println!("{json}");
            Ok(if envelope.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Mode::Serve => {
            serve(&config, generator).await?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Chat => {
            chat(&config, generator).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Ctrl-C cancels the returned token.
fn shutdown_on_ctrl_c() -> CancellationToken {
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            token.cancel();
        }
    });
    shutdown
}

#[cfg(feature = "server")]
async fn serve(config: &Config, generator: Arc<TestCaseGenerator>) -> Result<(), AppError> {
    print_startup_summary(config, "serve");
    local_testgen::server::run(&config.server.bind, generator, shutdown_on_ctrl_c()).await
}

#[cfg(not(feature = "server"))]
async fn serve(_config: &Config, _generator: Arc<TestCaseGenerator>) -> Result<(), AppError> {
    Err(AppError::Config("serve: http server not compiled in (feature `server`)".into()))
}

#[cfg(feature = "console")]
async fn chat(config: &Config, generator: Arc<TestCaseGenerator>) -> Result<(), AppError> {
    print_startup_summary(config, "chat");
    local_testgen::console::run(generator, config.console.history_cap, shutdown_on_ctrl_c()).await?;
    println!("Bye :) ...");
    Ok(())
}

#[cfg(not(feature = "console"))]
async fn chat(_config: &Config, _generator: Arc<TestCaseGenerator>) -> Result<(), AppError> {
    Err(AppError::Config("chat: console not compiled in (feature `console`)".into()))
}

fn print_startup_summary(config: &Config, mode: &str) {
    let fit = |text: String| -> String {
        const WIDTH: usize = 56;
        if text.chars().count() >= WIDTH {
            let mut out = text.chars().take(WIDTH - 1).collect::<String>();
            out.push('…');
            out
        } else {
            format!("{text:<WIDTH$}")
        }
    };

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║ {}║", fit("🧪 Local LLM Test Case Generator".to_string()));
    println!("╟──────────────────────────────────────────────────────────╢");
    println!("║ {}║", fit(format!("mode:    {mode}")));
    println!("║ {}║", fit(format!("backend: {}", config.ollama.api_url)));
    println!("║ {}║", fit(format!("model:   {}", config.ollama.default_model)));
    println!(
        "║ {}║",
        fit(format!(
            "temp={} timeout={}s",
            config.ollama.temperature, config.ollama.timeout_seconds
        ))
    );
    if mode == "serve" {
        println!("║ {}║", fit(format!("api:     http://{}/api/generate", config.server.bind)));
    }
    println!("╚══════════════════════════════════════════════════════════╝");
}

// ── CLI ──────────────────────────────────────────────────────────────────────

enum Mode {
    Serve,
    Chat,
    Generate { text: String, model: Option<String> },
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    mode: Mode,
}

fn print_help() {
    println!("Usage: testgen [OPTIONS] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  serve                      Run the HTTP API (default)");
    println!("  chat                       Interactive console");
    println!("  generate <TEXT>...         Generate once and print the JSON envelope");
    println!();
    println!("Options:");
    println!("  -h, --help                 Print help");
    println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
    println!("  -m, --model <ID>           Model for `generate` (default: configured model)");
    println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
}

fn parse_cli_args() -> Result<CliArgs, AppError> {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut model = None;
    let mut positional: Vec<String> = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            positional.extend(iter.by_ref());
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-f" | "--config" => {
                config_path = Some(iter.next().ok_or_else(|| {
                    AppError::Config("-f/--config requires a path argument".into())
                })?);
            }
            "-m" | "--model" => {
                model = Some(iter.next().ok_or_else(|| {
                    AppError::Config("-m/--model requires a model id".into())
                })?);
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            a if a.starts_with('-') && a.len() > 1 => {
                return Err(AppError::Config(format!("unknown option '{a}', see --help")));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let mode = match positional.next().as_deref() {
        None | Some("serve") => Mode::Serve,
        Some("chat") => Mode::Chat,
        Some("generate") => {
            let text = positional.collect::<Vec<_>>().join(" ");
            if text.trim().is_empty() {
                return Err(AppError::Config("generate requires a description".into()));
            }
            Mode::Generate { text, model }
        }
        Some(other) => {
            return Err(AppError::Config(format!("unknown command '{other}', see --help")));
        }
    };

    Ok(CliArgs { log_level: logger::level_for_verbosity(verbosity), config_path, mode })
}
