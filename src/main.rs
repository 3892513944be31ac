use std::fs::File;
use std::io::BufWriter;

use clap::Parser;
use dialoguer::{Confirm, Input, Password, Select};
use tracing_subscriber::EnvFilter;

use commentpulse::classifier::build_service;
use commentpulse::report::{format_markdown, format_text, write_csv};
use commentpulse::{
    AnalysisPipeline, AnalysisReport, ClassifierService, Config, Error, KeywordTagger,
    PipelineConfig, SpreadsheetReport, YouTubeClient,
};

/// Choices offered by the interactive prompt.
const COUNT_OPTIONS: [u32; 7] = [50, 100, 200, 500, 1000, 2000, 5000];

#[derive(Parser, Debug)]
#[command(name = "commentpulse")]
#[command(version = "0.1.0")]
#[command(about = "Analyze YouTube comment sentiment, leads and questions")]
struct Args {
    /// YouTube video URL or ID; omit to start the interactive prompt
    #[arg(short, long)]
    url: Option<String>,

    /// Number of comments to analyze (1-5000)
    #[arg(short, long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..=5000))]
    count: u32,

    /// YouTube Data API key (overrides YOUTUBE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Summary format (text, markdown, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Summary output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Spreadsheet report path
    #[arg(long, default_value = "reporte.xlsx")]
    xlsx: String,

    /// Also write a CSV export
    #[arg(long)]
    csv: Option<String>,

    /// Classify brand safety (toxicity) as well
    #[arg(long)]
    toxicity: bool,

    /// Classifier backend (auto, huggingface, lexicon)
    #[arg(long)]
    backend: Option<String>,

    /// Number of comments in each top list
    #[arg(long)]
    top: Option<usize>,

    /// Keep prompting for videos even when --url is given
    #[arg(short, long)]
    interactive: bool,
}

/// Shared state for every run in this process.
struct Session {
    classifier: ClassifierService,
    tagger: KeywordTagger,
    pipeline_config: PipelineConfig,
}

impl Session {
    async fn run(&self, api_key: &str, target: &str, count: u32) -> commentpulse::Result<AnalysisReport> {
        let youtube = YouTubeClient::new(api_key)?;
        let pipeline = AnalysisPipeline::new(
            youtube,
            self.classifier.clone(),
            self.tagger.clone(),
            self.pipeline_config.clone(),
        );
        pipeline.analyze(target, count).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("commentpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load configuration, CLI flags win
    let mut config = Config::from_env()?;
    if let Some(ref key) = args.api_key {
        config.youtube_api_key = Some(key.clone());
    }
    if let Some(ref backend) = args.backend {
        config.classifier_backend = backend.parse()?;
    }
    if args.toxicity {
        config.enable_toxicity = true;
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }

    let session = Session {
        classifier: build_service(&config)?,
        tagger: KeywordTagger::from_overrides(
            config.lead_keywords.as_deref(),
            config.question_keywords.as_deref(),
        ),
        pipeline_config: PipelineConfig::from(&config),
    };

    match args.url.clone() {
        Some(url) if !args.interactive => {
            let api_key = config.youtube_api_key.clone().unwrap_or_default();
            match session.run(&api_key, &url, args.count).await {
                Ok(report) => write_outputs(&report, &args)?,
                Err(e) => {
                    report_error(&e);
                    std::process::exit(1);
                }
            }
        }
        first_url => interactive(&session, &args, config.youtube_api_key.clone(), first_url).await?,
    }

    Ok(())
}

async fn interactive(
    session: &Session,
    args: &Args,
    mut api_key: Option<String>,
    mut next_url: Option<String>,
) -> anyhow::Result<()> {
    println!("Analyze comments and spot sales opportunities.\n");
    let count_labels: Vec<String> = COUNT_OPTIONS.iter().map(|c| c.to_string()).collect();
    let default_count = COUNT_OPTIONS
        .iter()
        .position(|&c| c == args.count)
        .unwrap_or(1);

    loop {
        let key = match api_key.clone() {
            Some(key) => key,
            None => Password::new()
                .with_prompt("YouTube API key")
                .allow_empty_password(true)
                .interact()?,
        };

        let url = match next_url.take() {
            Some(url) => url,
            None => Input::<String>::new()
                .with_prompt("YouTube video URL")
                .allow_empty(true)
                .interact_text()?,
        };

        let choice = Select::new()
            .with_prompt("Comments to analyze")
            .items(&count_labels)
            .default(default_count)
            .interact()?;

        match session.run(&key, &url, COUNT_OPTIONS[choice]).await {
            Ok(report) => {
                api_key = Some(key);
                if let Err(e) = write_outputs(&report, args) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(e) => {
                report_error(&e);
                // ask for the key again after it was rejected or missing
                api_key = match e {
                    Error::Access(_) | Error::Input(_) => None,
                    _ => Some(key),
                };
            }
        }

        if !Confirm::new()
            .with_prompt("Analyze another video?")
            .default(true)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}

fn report_error(e: &Error) {
    tracing::debug!("Run failed: {:?}", e);
    eprintln!("{}: {}", e.category(), e);
}

fn write_outputs(report: &AnalysisReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Summary written to: {}", path);
    } else {
        println!("{}", output);
    }

    SpreadsheetReport::new(report).save(&args.xlsx)?;

    if let Some(ref path) = args.csv {
        write_csv(&report.result, BufWriter::new(File::create(path)?))?;
        tracing::info!("CSV written to: {}", path);
    }

    Ok(())
}
