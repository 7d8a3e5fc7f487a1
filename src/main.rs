//! ChildSafe CLI - Main Entry Point
//!
//! Loads the policy and model set once, runs one command, prints JSON.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use childsafe_core::api::{self, DetectRequest, EnforceRequest, ErrorBody, Runtime, RuntimeOptions};
use childsafe_core::constants::{self, APP_NAME, APP_VERSION};
use childsafe_core::logic::features::SchemaMode;
use childsafe_core::logic::policy::parse_clock_time;
use childsafe_core::EngineError;

#[derive(Parser, Debug)]
#[command(name = "childsafe", version, about = "Child/adult risk scoring and enforcement")]
struct Cli {
    /// Directory holding manifest.json and the model members
    #[arg(long, global = true, env = constants::ENV_MODEL_DIR)]
    model_dir: Option<PathBuf>,

    /// Policy YAML file
    #[arg(long, global = true, env = constants::ENV_POLICY_PATH)]
    policy: Option<PathBuf>,

    /// Reject payload keys outside the feature schema
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a request (JSON file, or `-` for stdin)
    Detect { input: String },
    /// Score a request and apply the policy
    Enforce {
        input: String,
        /// Evaluate as if the local time were HH:MM[:SS] today
        #[arg(long)]
        at: Option<String>,
    },
    /// Report the loaded model set
    Health,
    /// Print the feature schema
    Schema,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    if let Command::Schema = cli.command {
        return print_json(&api::schema());
    }

    let runtime = load_runtime(&cli)?;

    match &cli.command {
        Command::Detect { input } => {
            let req: DetectRequest = read_request(input)?;
            finish(api::detect(runtime.engine(), &req))
        }
        Command::Enforce { input, at } => {
            let now = resolve_now(at.as_deref())?;
            let req: EnforceRequest = read_request(input)?;
            finish(runtime.enforce(&req, now))
        }
        Command::Health => print_json(&api::health(runtime.engine())),
        Command::Schema => print_json(&api::schema()),
    }
}

fn load_runtime(cli: &Cli) -> anyhow::Result<Runtime> {
    let options = RuntimeOptions {
        model_dir: cli.model_dir.clone().unwrap_or_else(constants::default_model_dir),
        policy_path: cli
            .policy
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_POLICY_PATH)),
        schema_mode: if cli.strict {
            SchemaMode::Strict
        } else {
            constants::get_schema_mode()
        },
    };

    Runtime::load(&options).with_context(|| {
        format!(
            "starting with policy {} and models {}",
            options.policy_path.display(),
            options.model_dir.display()
        )
    })
}

fn resolve_now(at: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    let now = Local::now().naive_local();
    match at {
        None => Ok(now),
        Some(raw) => match parse_clock_time(raw) {
            Some(time) => Ok(now.date().and_time(time)),
            None => bail!("invalid --at {:?}, expected HH:MM or HH:MM:SS", raw),
        },
    }
}

fn read_request<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        return serde_json::from_str(&buf).context("parsing request from stdin");
    }

    let path = Path::new(input);
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing request {}", path.display()))
}

fn finish<T: Serialize>(result: Result<T, EngineError>) -> anyhow::Result<()> {
    match result {
        Ok(body) => print_json(&body),
        Err(e) => {
            let body = ErrorBody::from(&e);
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(if body.client_error { 2 } else { 1 });
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
