use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixfx::engine::{catalog, EffectDefinition, ParamKind, ParamSet};
use pixfx::models::{load_params_file, parse_param_arg, AppConfig};
use pixfx::services::EffectService;

#[derive(Parser)]
#[command(name = "pixfx")]
#[command(about = "Stylized raster effects: dithering, halftone, ASCII art, CRT modulation")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, global = true, env = "PIXFX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available effects
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the parameters of an effect
    Describe {
        /// Effect id (see `pixfx list`)
        id: String,

        /// Print the parameter schema as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply an effect to a PNG file
    Apply {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Effect id; defaults to `default_effect` from the config
        #[arg(short, long)]
        effect: Option<String>,

        /// Parameter as key=value (repeatable, overrides --params)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// YAML or JSON file with parameters
        #[arg(long = "params", value_name = "FILE")]
        params_file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct EffectSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixfx=info,pixfx_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::List { json } => run_list_command(json),
        Commands::Describe { id, json } => run_describe_command(&id, json),
        Commands::Apply {
            input,
            output,
            effect,
            params,
            params_file,
        } => {
            let effect = effect.unwrap_or_else(|| config.default_effect.clone());
            run_apply_command(
                &config,
                &effect,
                &input,
                &output,
                &params,
                params_file.as_deref(),
            )
        }
    }
}

fn run_list_command(json: bool) -> anyhow::Result<()> {
    let effects = catalog().list();

    if json {
        let summaries: Vec<EffectSummary> = effects
            .iter()
            .map(|e| EffectSummary {
                id: e.id,
                name: e.name,
                description: e.description,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let width = effects.iter().map(|e| e.id.len()).max().unwrap_or(0);
    for effect in effects {
        println!("{:width$}  {}  {}", effect.id, effect.name, effect.description);
    }
    Ok(())
}

fn run_describe_command(id: &str, json: bool) -> anyhow::Result<()> {
    let effect = catalog()
        .lookup(id)
        .ok_or_else(|| anyhow::anyhow!("unknown effect: {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(effect)?);
        return Ok(());
    }

    print_effect(effect);
    Ok(())
}

fn print_effect(effect: &EffectDefinition) {
    println!("{} ({})", effect.name, effect.id);
    println!("{}\n", effect.description);

    for spec in effect.params {
        let detail = match &spec.kind {
            ParamKind::Range {
                min,
                max,
                step,
                default,
            } => format!("number {min}..{max} step {step}, default {default}"),
            ParamKind::Toggle { default } => format!("toggle, default {default}"),
            ParamKind::Color { default } => format!("color, default {default}"),
            ParamKind::Text { default, .. } => format!("text, default {default:?}"),
            ParamKind::Choice { options, default } => {
                let values: Vec<&str> = options.iter().map(|o| o.value).collect();
                format!("one of {}, default {default}", values.join("|"))
            }
        };
        println!("  {:18} {:22} {detail}", spec.id, spec.label);
    }
}

/// Apply an effect to a PNG file (params file first, then --param overrides)
fn run_apply_command(
    config: &AppConfig,
    effect: &str,
    input: &Path,
    output: &Path,
    param_args: &[String],
    params_file: Option<&Path>,
) -> anyhow::Result<()> {
    let definition = catalog()
        .lookup(effect)
        .ok_or_else(|| anyhow::anyhow!("unknown effect: {effect}"))?;

    let mut params = match params_file {
        Some(path) => load_params_file(path)?,
        None => ParamSet::new(),
    };
    let overrides = param_args
        .iter()
        .map(|arg| parse_param_arg(definition, arg))
        .collect::<Result<ParamSet, _>>()?;
    params.merge(overrides);

    let service = EffectService::new(config);
    service.apply_file(effect, input, output, &params)?;

    println!("Rendered {} with {effect}", output.display());
    Ok(())
}
