use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use search_assistant::api::{AppState, create_router};
use search_assistant::config::{CONFIG, TransportKind};
use search_assistant::controller::SearchController;
use search_assistant::data_models::Mode;
use search_assistant::transport::Backend;
use search_assistant::view::{CapturedView, TerminalView};

#[derive(Parser)]
#[command(name = "search-assistant", about = "Ask a search backend questions and read cited answers")]
struct Cli {
    /// `http` or `hosted`; defaults to SEARCH_TRANSPORT
    #[arg(long, global = true)]
    transport: Option<TransportKind>,

    /// Base URL of the HTTP search backend
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// URL of the hosted inference app
    #[arg(long, global = true)]
    hosted_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a single question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
        #[arg(short, long, default_value = "quick")]
        mode: Mode,
        /// Print the normalized response as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive prompt; `/quick` and `/deep` switch modes
    Repl {
        #[arg(short, long, default_value = "quick")]
        mode: Mode,
    },
    /// Serve the web front-end
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        static_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // Logs go to stderr; stdout carries answers.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = CONFIG.clone();
    if let Some(transport) = cli.transport {
        config.transport = transport;
    }
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    if let Some(url) = cli.hosted_url {
        config.hosted_url = url;
    }

    let backend = Backend::from_config(&config).await?;

    match cli.command {
        Command::Ask {
            question,
            mode,
            json,
        } => ask(backend, question.join(" "), mode, json).await,
        Command::Repl { mode } => repl(backend, mode).await.map(|_| ExitCode::SUCCESS),
        Command::Serve { bind, static_dir } => {
            let bind = bind.unwrap_or(config.bind_addr);
            let static_dir = static_dir.unwrap_or(config.static_dir);
            serve(backend, &bind, &static_dir)
                .await
                .map(|_| ExitCode::SUCCESS)
        }
    }
}

/// Exits non-zero when the search fails; the failure itself has already been
/// rendered by the view.
async fn ask(
    backend: Backend,
    question: String,
    mode: Mode,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let outcome = if json {
        let view = Arc::new(CapturedView::with_question(question));
        let mut controller = SearchController::new(backend, view);
        controller.set_mode(mode);
        let outcome = controller.submit_query().await;
        if let Ok(response) = &outcome {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        outcome
    } else {
        let view = Arc::new(TerminalView::default());
        view.set_question(question);
        let mut controller = SearchController::new(backend, view);
        controller.set_mode(mode);
        controller.submit_query().await
    };

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if json {
                eprintln!("{e}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn repl(backend: Backend, mode: Mode) -> anyhow::Result<()> {
    let view = Arc::new(TerminalView::default());
    let mut controller = SearchController::new(backend, view.clone());
    controller.set_mode(mode);

    eprintln!("Type a question and press Enter. /quick and /deep switch modes, /quit exits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "/quit" | "/exit" => break,
            command if command.starts_with('/') => match command[1..].parse::<Mode>() {
                Ok(mode) => controller.set_mode(mode),
                Err(e) => eprintln!("{e}"),
            },
            _ => {
                view.set_question(input);
                tokio::select! {
                    _ = controller.submit_query() => {}
                    _ = tokio::signal::ctrl_c() => eprintln!("search abandoned"),
                }
            }
        }
    }
    Ok(())
}

async fn serve(backend: Backend, bind: &str, static_dir: &str) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(backend));
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("search UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
