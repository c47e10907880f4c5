use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::QuestionLoader;
use storage::{JsonFileStore, KeyValueStore};
use ui::{build_app_context, App, UiApp};

const DEFAULT_QUESTIONS_URL: &str = "http://127.0.0.1:8080/questions.json";
const DEFAULT_STATE_FILE: &str = "quiz-state.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUrl { raw: String },
    InvalidStateFile { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUrl { raw } => write!(f, "invalid --questions-url value: {raw}"),
            ArgsError::InvalidStateFile { raw } => write!(f, "invalid --state-file value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions-url <url>] [--state-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions-url {DEFAULT_QUESTIONS_URL}");
    eprintln!("  --state-file {DEFAULT_STATE_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS_URL, QUIZ_STATE_FILE");
}

struct Args {
    questions_url: String,
    state_file: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions_url = std::env::var("QUIZ_QUESTIONS_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_QUESTIONS_URL.into());
        let mut state_file = std::env::var("QUIZ_STATE_FILE")
            .ok()
            .unwrap_or_else(|| DEFAULT_STATE_FILE.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions-url" => {
                    let value = require_value(args, "--questions-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidUrl { raw: value });
                    }
                    questions_url = value;
                }
                "--state-file" => {
                    let value = require_value(args, "--state-file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidStateFile { raw: value });
                    }
                    state_file = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            questions_url,
            state_file,
        })
    }
}

struct DesktopApp {
    store: Arc<JsonFileStore>,
    loader: Arc<QuestionLoader>,
}

impl UiApp for DesktopApp {
    fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store) as Arc<dyn KeyValueStore>
    }

    fn question_loader(&self) -> Arc<QuestionLoader> {
        Arc::clone(&self.loader)
    }
}

fn prepare_state_file(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = std::path::Path::new(raw);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open the state file in the binary glue so storage/services stay pure.
    prepare_state_file(&parsed.state_file)?;
    let store = Arc::new(JsonFileStore::open(&parsed.state_file)?);
    let loader = Arc::new(QuestionLoader::new(&parsed.questions_url));

    let app = DesktopApp { store, loader };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    // Explicitly disable always-on-top so dev setups don't get a modal-like window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
