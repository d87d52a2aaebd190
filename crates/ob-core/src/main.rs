//! odds-bayes CLI
//!
//! Trains a model from a JSON Lines corpus, classifies feature sets against a
//! saved model and inspects model statistics. Command payloads are JSON on
//! stdout; logs go to stderr.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use ob_config::{
    resolve_config_path, validate_config, ClassifierConfig, ConfigSource, LidstoneCoefficient,
    Smoothing,
};
use ob_core::corpus::read_corpus;
use ob_core::exit_codes::ExitCode;
use ob_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use ob_core::{
    load_model, save_model, Accumulation, ClassificationReport, CountStore, Error, Feature,
    PosteriorOptions, StringLabels, Trainer,
};
use serde::Serialize;
use tracing::{debug, info};

/// Naive Bayes classification in odds form
#[derive(Parser)]
#[command(name = "ob")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to classifier.json (falls back to OB_CONFIG, OB_CONFIG_DIR, XDG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a JSON Lines corpus
    Train(TrainArgs),

    /// Classify a feature set against a saved model
    Classify(ClassifyArgs),

    /// Prior odds of one label in a saved model
    PriorOdds(PriorOddsArgs),

    /// Summarize a saved model
    Inspect(InspectArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Train(_) => "train",
            Commands::Classify(_) => "classify",
            Commands::PriorOdds(_) => "prior-odds",
            Commands::Inspect(_) => "inspect",
        }
    }
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Corpus file, one {"label", "features"} object per line
    #[arg(long)]
    corpus: PathBuf,

    /// Where to write the model
    #[arg(long)]
    out: PathBuf,

    /// Add one pseudo-count to every feature/label cell
    #[arg(long)]
    laplace: bool,

    /// Add a pseudo-count in (0, 1) to every feature/label cell
    #[arg(long, value_name = "A")]
    lidstone: Option<f64>,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Model file written by `ob train`
    #[arg(long)]
    model: PathBuf,

    /// Observed feature as name=value (repeatable)
    #[arg(short = 'F', long = "feature", value_name = "NAME=VALUE", required = true)]
    features: Vec<Feature>,

    /// Replace training label counts for prior odds, as label=count (repeatable)
    #[arg(long = "prior", value_name = "LABEL=COUNT", value_parser = parse_prior)]
    priors: Vec<(String, f64)>,

    /// Start from even odds instead of the prior odds
    #[arg(long)]
    ignore_prior_odds: bool,

    /// Accumulate in log space
    #[arg(long)]
    log_odds: bool,
}

#[derive(Args, Debug)]
struct PriorOddsArgs {
    #[arg(long)]
    model: PathBuf,

    #[arg(long)]
    label: String,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[arg(long)]
    model: PathBuf,

    /// Print the complete model dump instead of a summary
    #[arg(long)]
    full: bool,
}

fn parse_prior(s: &str) -> Result<(String, f64), String> {
    let (label, count) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected label=count, got '{}'", s))?;
    if label.is_empty() {
        return Err(format!("empty label in '{}'", s));
    }
    let count: f64 = count
        .parse()
        .map_err(|_| format!("invalid count '{}' for label '{}'", count, label))?;
    if !count.is_finite() || count < 0.0 {
        return Err(format!("count for '{}' must be a non-negative number", label));
    }
    Ok((label.to_string(), count))
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            std::process::exit(code.as_i32());
        }
    };

    let log_level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    let log_config = LogConfig::from_env(log_level, cli.global.log_format);
    init_logging(&log_config);

    let span = tracing::info_span!("ob", run_id = %generate_run_id(), command = cli.command.name());
    let _enter = span.enter();

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => report_error(&err, log_config.format),
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = load_classifier_config(cli.global.config.as_deref())?;
    match &cli.command {
        Commands::Train(args) => run_train(&config, args),
        Commands::Classify(args) => run_classify(&config, args),
        Commands::PriorOdds(args) => run_prior_odds(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn report_error(err: &Error, format: LogFormat) -> ExitCode {
    let code = ExitCode::from(err);
    match format {
        LogFormat::Jsonl => match serde_json::to_string(&err.to_structured()) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("error: {}", err),
        },
        LogFormat::Human => eprintln!("error: {}", err),
    }
    code
}

fn load_classifier_config(cli_path: Option<&Path>) -> Result<ClassifierConfig, Error> {
    if let Some(path) = cli_path {
        if !path.exists() {
            return Err(Error::Config(ob_config::ValidationError::IoError(format!(
                "config file not found: {}",
                path.display()
            ))));
        }
    }

    let resolved = resolve_config_path(cli_path);
    let config = match &resolved.path {
        Some(path) => ClassifierConfig::from_file(path)?,
        None => ClassifierConfig::default(),
    };
    validate_config(&config)?;

    if resolved.source != ConfigSource::BuiltinDefault {
        debug!(
            source = %resolved.source,
            path = ?resolved.path,
            "classifier config loaded"
        );
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Serialize)]
struct TrainSummary {
    model: String,
    examples: usize,
    labels: usize,
    features: usize,
    cases_total: f64,
    smoothing: String,
}

fn run_train(config: &ClassifierConfig, args: &TrainArgs) -> Result<(), Error> {
    let smoothing = match (args.lidstone, args.laplace) {
        (Some(a), _) => Smoothing::Lidstone(LidstoneCoefficient::new(a)?),
        (None, true) => Smoothing::Laplace,
        (None, false) => config.smoothing()?,
    };

    let examples = read_corpus(&args.corpus)?;
    let store = Trainer::new().with_smoothing(smoothing).train(&examples);
    save_model(&args.out, &store, &StringLabels)?;
    info!(examples = examples.len(), "training complete");

    print_json(&TrainSummary {
        model: args.out.display().to_string(),
        examples: examples.len(),
        labels: store.labels().len(),
        features: store.feature_len(),
        cases_total: store.cases_total(),
        smoothing: smoothing.to_string(),
    })
}

fn run_classify(config: &ClassifierConfig, args: &ClassifyArgs) -> Result<(), Error> {
    let store: CountStore<String> = load_model(&args.model, &StringLabels)?;

    let mut options = PosteriorOptions::from_config(&config.classification);
    if args.ignore_prior_odds {
        options = options.ignore_prior_odds(true);
    }
    if args.log_odds {
        options = options.with_accumulation(Accumulation::Log);
    }
    if !args.priors.is_empty() {
        let distribution: HashMap<String, f64> = args.priors.iter().cloned().collect();
        options = options.with_prior_odds(distribution);
    }

    let posterior = store.posterior_odds(&args.features, &options)?;
    let report = ClassificationReport::new(&posterior, &StringLabels, options.accumulation());
    print_json(&report)
}

#[derive(Serialize)]
struct PriorOddsSummary {
    label: String,
    prior_odds: f64,
    probability: f64,
}

fn run_prior_odds(args: &PriorOddsArgs) -> Result<(), Error> {
    let store: CountStore<String> = load_model(&args.model, &StringLabels)?;
    let prior_odds = store.prior_odds(&args.label)?;
    print_json(&PriorOddsSummary {
        label: args.label.clone(),
        prior_odds,
        probability: ob_math::probability_from_odds(prior_odds),
    })
}

#[derive(Serialize)]
struct InspectSummary {
    labels: Vec<String>,
    cases_total: f64,
    label_cases: BTreeMap<String, f64>,
    features: usize,
    /// Distinct values observed per feature name.
    feature_names: BTreeMap<String, usize>,
}

fn run_inspect(args: &InspectArgs) -> Result<(), Error> {
    let store: CountStore<String> = load_model(&args.model, &StringLabels)?;
    let dump = ob_core::inspect(&store, &StringLabels);
    if args.full {
        return print_json(&dump);
    }

    let feature_names = dump
        .feature_cases
        .iter()
        .map(|(name, values)| (name.clone(), values.len()))
        .collect();
    print_json(&InspectSummary {
        labels: dump.labels,
        cases_total: dump.cases_total,
        label_cases: dump.label_cases,
        features: store.feature_len(),
        feature_names,
    })
}
