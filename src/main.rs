use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use prediction_forms::form::{FormEffect, FormEvent, PredictionForm};
use prediction_forms::{ClientConfig, Dashboard, PredictionClient, View, WidgetKind, init_tracing};

const USAGE: &str =
    "usage: prediction-forms [--config <path>] [list | fields <widget> | info | dashboard | <widget>]";

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = init_tracing() {
        eprintln!("{e}");
    }

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_config_flag(&mut args)?;
    let config = ClientConfig::load(config_path.as_deref()).context("failed to load configuration")?;
    let client = PredictionClient::new(&config).context("failed to build HTTP client")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    match args.first().map(String::as_str) {
        Some("list") => list(&client),
        Some("fields") => {
            let kind: WidgetKind = args.get(1).ok_or_else(|| anyhow!(USAGE))?.parse()?;
            fields(kind);
        }
        Some("info") => {
            let info = client.info().await.context("health check failed")?;
            println!("Status: {}", info.status);
            println!("Models: {}", info.models.join(", "));
        }
        Some("dashboard") => {
            let dashboard = Dashboard::new(client, &config);
            if let Some(text) = run_dashboard(&dashboard, &mut lines).await? {
                print!("{text}");
            }
        }
        Some("-h" | "--help" | "help") => println!("{USAGE}"),
        Some(name) => {
            let kind: WidgetKind = name.parse()?;
            run_form(kind, &client, &config, &mut lines).await?;
        }
        None => {
            println!("--- Prediction Forms ---");
            list(&client);
            let Some(choice) = prompt(&mut lines, "Choose a widget: ")? else {
                return Ok(());
            };
            if choice.is_empty() {
                println!("No widget chosen.");
                return Ok(());
            }
            run_form(choice.parse()?, &client, &config, &mut lines).await?;
        }
    }

    Ok(())
}

fn take_config_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("--config needs a path\n{USAGE}");
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(path)))
}

fn list(client: &PredictionClient) {
    for line in list_lines(client) {
        println!("{line}");
    }
}

fn list_lines(client: &PredictionClient) -> Vec<String> {
    let mut out = Vec::new();
    for kind in WidgetKind::ALL {
        let endpoint = client.endpoint(kind);
        out.push(format!("  {:<13} {:<26} POST {}", kind.slug(), kind.title(), endpoint));
        if let Some(legacy) = kind.legacy_endpoint().filter(|legacy| endpoint.as_str() != *legacy) {
            out.push(format!(
                "  {:<13} {:<26} (older form posted to {legacy}; set endpoints.{} to use it)",
                "",
                "",
                kind.slug()
            ));
        }
    }
    out
}

fn fields(kind: WidgetKind) {
    println!("{} ({} fields)", kind.title(), kind.fields().len());
    for field in kind.fields() {
        println!("  {:<24} {}", field.key, field.prompt());
    }
}

/// Reads one trimmed line. `None` on end of input.
fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

async fn run_form(
    kind: WidgetKind,
    client: &PredictionClient,
    config: &ClientConfig,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let mut form = PredictionForm::new(kind).with_enforced_ranges(config.enforce_ranges);
    println!("\n== {} ==", kind.title());

    // Every field first, then only the ones validation refused.
    let mut pending: Vec<&str> = kind.payload_keys().collect();
    loop {
        for key in &pending {
            let Some(field) = kind.fields().iter().find(|f| f.key == *key) else {
                continue;
            };
            let Some(value) = prompt(&mut *lines, &format!("{}: ", field.prompt()))? else {
                println!("\nInput closed, nothing submitted.");
                return Ok(());
            };
            form.update(FormEvent::Edit {
                key: field.key.to_string(),
                value,
            });
        }

        match form.update(FormEvent::Submit) {
            FormEffect::Dispatch(ticket) => {
                print_view(&View::Loading);
                let resolution = client.dispatch(ticket).await;
                form.update(FormEvent::Resolved(resolution));
                print_view(&View::of(form.mode()));
                return Ok(());
            }
            FormEffect::Rejected(errors) => {
                for error in &errors {
                    println!("  ! {error}");
                }
                let refused: Vec<String> = errors.iter().map(|e| e.key().to_string()).collect();
                pending = kind.payload_keys().filter(|k| refused.iter().any(|r| r.as_str() == *k)).collect();
            }
            other => bail!("unexpected form effect on submit: {other:?}"),
        }
    }
}

/// Fills every widget from `lines`, submits all four at once and returns
/// the rendered dashboard. `None` if input closed before the last field.
async fn run_dashboard(
    dashboard: &Dashboard,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<String>> {
    for kind in WidgetKind::ALL {
        println!("\n== {} ==", kind.title());
        for field in kind.fields() {
            let Some(value) = prompt(&mut *lines, &format!("{}: ", field.prompt()))? else {
                println!("\nInput closed, nothing submitted.");
                return Ok(None);
            };
            dashboard.edit(kind, field.key, &value).await;
        }
    }
    println!();
    dashboard.submit_all().await;
    Ok(Some(dashboard.render().await))
}

fn print_view(view: &View) {
    for line in view.lines() {
        println!("{line}");
    }
}
