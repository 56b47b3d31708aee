// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line entry point.
//!
//! ```text
//! enigma encrypt --rotors I,II,III --position ADU HELLOWORLD
//! enigma --encrypt HELLOWORLD --position AAA
//! enigma search --rings AAA --max-candidates 100000 QBLTWLDAHH
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use enigma_search::catalog::{ReflectorId, RotorId};
use enigma_search::machine::window_setting;
use enigma_search::plausibility::Language;
use enigma_search::search::cancel_pair;
use enigma_search::{
    encipher_str, parse_letters, KeySpace, MachineConfig, MachineModel, Plugboard, SearchBudget,
    SearchConfig, SearchController, SearchStatus, TrialDecryptionScorer,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "enigma")]
#[command(about = "Enigma simulator and score-guided key search", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Encipher TEXT with the key flags below (batch mode for data generators)
    #[arg(long, value_name = "TEXT")]
    encrypt: Option<String>,

    #[command(flatten)]
    key: KeyArgs,

    /// Log level
    #[arg(long, env = "ENIGMA_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "ENIGMA_LOG_JSON", global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Encipher (or decipher) text under a known key
    Encrypt {
        #[command(flatten)]
        key: KeyArgs,

        /// Letters A-Z, either case
        text: String,
    },
    /// Recover the key of a ciphertext
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Machine model: EnigmaI, M3 or M4
    #[arg(long, default_value = "EnigmaI")]
    model: MachineModel,

    /// Reflector (default: B, or B-thin on the M4)
    #[arg(long)]
    reflector: Option<ReflectorId>,

    /// Rotors left to right, e.g. I,II,III or Beta,II,IV,I
    #[arg(long, value_delimiter = ',')]
    rotors: Vec<RotorId>,

    /// Ring settings as letters, e.g. AAA
    #[arg(long)]
    rings: Option<String>,

    /// Starting window letters, e.g. ADU
    #[arg(long)]
    position: Option<String>,

    /// Plugboard pairs, e.g. "AB CD EF"
    #[arg(long, default_value = "")]
    plugboard: String,
}

impl KeyArgs {
    fn to_config(&self) -> Result<MachineConfig> {
        let rotors = if self.rotors.is_empty() {
            let mut rotors = self.model.thin_rotors().iter().take(1).copied().collect::<Vec<_>>();
            rotors.extend_from_slice(&self.model.stepping_rotors()[..3]);
            rotors
        } else {
            self.rotors.clone()
        };
        let mut config = MachineConfig::new(self.model, rotors)
            .with_plugboard(Plugboard::parse(&self.plugboard)?);
        if let Some(reflector) = self.reflector {
            config = config.with_reflector(reflector);
        }
        if let Some(rings) = &self.rings {
            config = config.with_rings(window_setting(rings)?);
        }
        if let Some(position) = &self.position {
            config = config.with_positions(window_setting(position)?);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Ciphertext letters A-Z, either case
    ciphertext: String,

    /// Configuration file path
    #[arg(short, long, env = "ENIGMA_CONFIG")]
    config: Option<String>,

    /// Machine model: EnigmaI, M3 or M4
    #[arg(long, default_value = "EnigmaI")]
    model: MachineModel,

    /// Try every reflector of the model instead of the standard one
    #[arg(long)]
    all_reflectors: bool,

    /// Fix the ring settings, e.g. AAA
    #[arg(long)]
    rings: Option<String>,

    /// Known plugboard pairs
    #[arg(long, default_value = "")]
    plugboard: String,

    /// Stop after trial-decrypting this many candidates
    #[arg(long)]
    max_candidates: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Parallel verifications per wave
    #[arg(long)]
    workers: Option<usize>,

    /// Plaintext language: german or english
    #[arg(long)]
    language: Option<Language>,

    /// Walk the key space in order instead of ranking with the built-in scorer
    #[arg(long)]
    no_scorer: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_level.to_string().into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn encrypt(key: &KeyArgs, text: &str) -> Result<ExitCode> {
    let config = key.to_config()?;
    info!(%config, "enciphering");
    println!("{}", encipher_str(text, &config)?);
    Ok(ExitCode::SUCCESS)
}

async fn search(args: SearchArgs) -> Result<ExitCode> {
    let mut settings = SearchConfig::load(args.config.as_deref())
        .context("failed to load search configuration")?;
    if let Some(workers) = args.workers {
        settings.workers = workers;
    }
    if let Some(language) = args.language {
        settings.language = language;
    }

    let mut space = KeySpace::builder(args.model).plugboards(vec![Plugboard::parse(&args.plugboard)?]);
    if args.all_reflectors {
        space = space.all_reflectors();
    }
    if let Some(rings) = &args.rings {
        space = space.fixed_rings(window_setting(rings)?);
    }
    let space = space.build()?;

    let mut controller = SearchController::new(space, settings.clone())?;
    if !args.no_scorer {
        controller = controller.with_scorer(Arc::new(TrialDecryptionScorer::new(
            settings.language,
            settings.scorer_prefix,
        )));
    }

    let mut budget = SearchBudget::unlimited();
    if let Some(max) = args.max_candidates {
        budget = budget.with_max_candidates(max);
    }
    if let Some(secs) = args.deadline_secs {
        budget = budget.with_time_limit(Duration::from_secs(secs));
    }

    let ciphertext = parse_letters(&args.ciphertext)?;
    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing in-flight verifications");
            handle.cancel();
        }
    });

    let outcome = controller.run(&ciphertext, budget, signal).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(match outcome.status {
        SearchStatus::Accepted => ExitCode::SUCCESS,
        SearchStatus::Exhausted | SearchStatus::Aborted => ExitCode::from(2),
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json);

    match (cli.command, cli.encrypt) {
        (Some(Command::Encrypt { key, text }), _) => encrypt(&key, &text),
        (Some(Command::Search(args)), _) => search(args).await,
        (None, Some(text)) => encrypt(&cli.key, &text),
        (None, None) => bail!("nothing to do: use `enigma encrypt`, `enigma search` or --encrypt"),
    }
}
