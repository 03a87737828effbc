//! `breezy check`: probe the model server before chatting.
//!
//! For the native Ollama API this lists the installed models
//! (`GET /api/tags`) and reports whether the configured one is among
//! them. OpenAI-compatible servers get a one-word completion instead.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tracing::{Instrument, info_span};

use breezy_infra::llm::ollama::{OllamaProvider, model_matches};
use breezy_infra::llm::{create_provider, test_provider_connection};
use breezy_observe::genai_attrs;
use breezy_types::config::ClientConfig;
use breezy_types::llm::ProviderType;

/// Outcome of a probe, printed as text or JSON.
#[derive(Debug)]
struct CheckReport {
    reachable: bool,
    model_installed: bool,
    models: Vec<(String, u64)>,
    error: Option<String>,
}

/// Run the probe and print the report. Returns whether chatting would work.
pub async fn run_check(
    config: &ClientConfig,
    api_key: Option<&str>,
    json: bool,
) -> anyhow::Result<bool> {
    let span = info_span!(
        "gen_ai.health_check",
        gen_ai.operation.name = genai_attrs::OP_HEALTH_CHECK,
        gen_ai.provider.name = %config.provider,
        gen_ai.request.model = %config.model,
    );
    let report = probe(config, api_key).instrument(span).await?;

    if json {
        print_json(config, &report)?;
    } else {
        print_text(config, &report);
    }

    Ok(report.reachable && report.model_installed)
}

async fn probe(config: &ClientConfig, api_key: Option<&str>) -> anyhow::Result<CheckReport> {
    match config.provider {
        ProviderType::Ollama => {
            let timeout = config.request_timeout_secs.map(Duration::from_secs);
            let provider = OllamaProvider::new(&config.host, &config.model, timeout)?;
            Ok(match provider.list_models().await {
                Ok(tags) => {
                    let model_installed =
                        tags.iter().any(|t| model_matches(&t.name, &config.model));
                    CheckReport {
                        reachable: true,
                        model_installed,
                        models: tags.into_iter().map(|t| (t.name, t.size)).collect(),
                        error: None,
                    }
                }
                Err(e) => unreachable_report(e.to_string()),
            })
        }
        ProviderType::OpenAiCompatible => {
            let provider = create_provider(config, api_key)?;
            Ok(match test_provider_connection(&provider).await {
                Ok(()) => CheckReport {
                    reachable: true,
                    model_installed: true,
                    models: Vec::new(),
                    error: None,
                },
                Err(e) => unreachable_report(e.to_string()),
            })
        }
    }
}

fn unreachable_report(error: String) -> CheckReport {
    tracing::debug!(error = %error, "Model server check failed");
    CheckReport {
        reachable: false,
        model_installed: false,
        models: Vec::new(),
        error: Some(error),
    }
}

fn print_json(config: &ClientConfig, report: &CheckReport) -> anyhow::Result<()> {
    let models: Vec<serde_json::Value> = report
        .models
        .iter()
        .map(|(name, size)| serde_json::json!({ "name": name, "size": size }))
        .collect();
    let check = serde_json::json!({
        "host": config.host,
        "provider": config.provider.to_string(),
        "model": config.model,
        "reachable": report.reachable,
        "model_installed": report.model_installed,
        "models": models,
        "error": report.error,
    });
    println!("{}", serde_json::to_string_pretty(&check)?);
    Ok(())
}

fn print_text(config: &ClientConfig, report: &CheckReport) {
    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Model server at {}",
        check_mark(report.reachable),
        style(&config.host).cyan()
    );
    if let Some(error) = &report.error {
        println!("    {}", style(error).dim());
        println!(
            "    {}",
            style("Without a server the chat answers in offline mode.").dim()
        );
        println!();
        return;
    }

    println!(
        "  {} Model {} available",
        check_mark(report.model_installed),
        style(&config.model).yellow()
    );
    if !report.model_installed {
        println!(
            "    {} {}",
            style("Install it with:").dim(),
            style(format!("ollama pull {}", config.model)).cyan()
        );
    }

    if !report.models.is_empty() {
        println!();
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Model").fg(Color::White),
            Cell::new("Size").fg(Color::White),
            Cell::new("Active").fg(Color::White),
        ]);
        for (name, size) in &report.models {
            let active = if model_matches(name, &config.model) {
                Cell::new("*").fg(Color::Green)
            } else {
                Cell::new("")
            };
            table.add_row(vec![Cell::new(name), Cell::new(format_size(*size)), active]);
        }
        println!("{table}");
    }
    println!();
}

/// Human-readable byte count (decimal units, like `ollama list`).
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1000 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = "B";
    for next in UNITS {
        if value < 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}
