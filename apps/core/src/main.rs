// Sentiment Dashboard entry point
// Individual analyzer, live dashboard and preflight check over the sentiment core

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use sentiment_dashboard::config::DashboardConfig;
use sentiment_dashboard::dashboard::{render_analysis, render_dashboard, Dashboard, DashboardState};
use sentiment_dashboard::feed::{FeedFormat, FileSource};
use sentiment_dashboard::preflight::run_preflight_checks;
use sentiment_dashboard::sentiment::{
    Lexicon, SentimentAggregator, SentimentAnalyzer, SentimentClassifier, SAMPLE_TEXT,
};
use sentiment_dashboard::AppError;

#[derive(Parser)]
#[command(name = "sentiment-dashboard")]
#[command(about = "Keyword-based sentiment dashboard for Portuguese event feedback")]
#[command(version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// JSON lexicon replacing the built-in marker lists
    #[arg(long, global = true, value_name = "PATH")]
    lexicon: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Feed options; each one overrides its SENTIMENT_* variable
#[derive(Args, Debug)]
struct FeedArgs {
    /// Comment feed file
    #[arg(short, long, value_name = "PATH")]
    source: Option<PathBuf>,

    /// Feed layout: lines, tsv or json
    #[arg(short, long)]
    format: Option<FeedFormat>,

    /// Zero-based column of the comment in tsv/json rows
    #[arg(long)]
    column: Option<usize>,

    /// Number of recent comments to list
    #[arg(long)]
    tail: Option<usize>,

    /// Number of words in the word cloud
    #[arg(long)]
    top_words: Option<usize>,

    /// Seconds a loaded feed stays cached
    #[arg(long)]
    refresh_secs: Option<u64>,
}

impl FeedArgs {
    fn apply(self, config: &mut DashboardConfig) {
        if let Some(source) = self.source {
            config.source = Some(source);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(column) = self.column {
            config.comment_column = column;
        }
        if let Some(tail) = self.tail {
            config.tail_size = tail;
        }
        if let Some(top_words) = self.top_words {
            config.top_words = top_words;
        }
        if let Some(refresh_secs) = self.refresh_secs {
            config.refresh_secs = refresh_secs;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single text
    Analyze {
        /// Text to analyze (defaults to a sample sentence)
        text: Option<String>,
    },

    /// Aggregate the comment feed
    Dashboard {
        #[command(flatten)]
        feed: FeedArgs,

        /// Keep re-rendering until Ctrl-C
        #[arg(short, long)]
        watch: bool,

        /// Seconds between renders in watch mode
        #[arg(long, default_value_t = 5)]
        every: u64,
    },

    /// Verify configuration, lexicon and feed
    Check {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_classifier(config: &DashboardConfig) -> Result<SentimentClassifier, AppError> {
    let lexicon = match &config.lexicon {
        Some(path) => {
            let lexicon = Lexicon::load(path)?;
            info!("Using lexicon {} from {}", lexicon.version(), path.display());
            lexicon
        }
        None => Lexicon::builtin().clone(),
    };
    Ok(SentimentClassifier::with_lexicon(lexicon))
}

fn print_state(state: &DashboardState, json: bool, clear: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(state)?);
    } else {
        if clear {
            print!("\x1B[2J\x1B[H");
        }
        println!("{}", render_dashboard(state));
    }
    Ok(())
}

async fn run_dashboard(
    config: &DashboardConfig,
    classifier: SentimentClassifier,
    json: bool,
    watch: Option<Duration>,
) -> anyhow::Result<()> {
    let Some(path) = config.source.clone() else {
        bail!("no comment feed configured (set SENTIMENT_SOURCE or pass --source)");
    };

    let source = FileSource::new(path, config.format, config.comment_column);
    let mut dashboard = Dashboard::new(source, SentimentAggregator::new(classifier), config);

    let Some(every) = watch else {
        return print_state(&dashboard.refresh(), json, false);
    };

    info!(
        "Watching feed, rendering every {}s, reloading every {}s",
        every.as_secs(),
        config.refresh_secs
    );

    let mut ticker = tokio::time::interval(every);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => print_state(&dashboard.refresh(), json, true)?,
            _ = &mut shutdown => {
                info!("Stopping dashboard");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = DashboardConfig::from_env().context("failed to load configuration")?;
    if let Some(lexicon) = cli.lexicon {
        config.lexicon = Some(lexicon);
    }

    match cli.command {
        Commands::Analyze { text } => {
            let classifier = build_classifier(&config)?;
            let text = text.unwrap_or_else(|| SAMPLE_TEXT.to_string());
            let packet = SentimentAnalyzer::new(classifier).analyze(&text);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&packet)?);
            } else {
                println!("{}", render_analysis(&packet));
            }
        }
        Commands::Dashboard { feed, watch, every } => {
            feed.apply(&mut config);
            config.validate().map_err(AppError::from)?;

            let classifier = build_classifier(&config)?;
            let watch = watch.then(|| Duration::from_secs(every.max(1)));
            run_dashboard(&config, classifier, cli.json, watch).await?;
        }
        Commands::Check { feed } => {
            feed.apply(&mut config);
            let report = run_preflight_checks(&config);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }

            if !report.all_passed {
                bail!("{}", report.summary);
            }
        }
    }

    Ok(())
}
