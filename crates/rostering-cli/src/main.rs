//! Copilot CLI - terminal chat against the rostering gateway.

mod repl;

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rostering_client::{
    spawn_panel, ChatPanel, HttpChatTransport, PanelCommand, PanelHandle, QuickActionLabels,
};
use rostering_core::{QuickActions, Role, TranscriptEntry, SUGGESTIONS};

use repl::{parse_input, Input};

/// Copilot CLI - chat with the nurse rostering copilot
#[derive(Parser)]
#[command(name = "copilot")]
#[command(about = "Terminal chat for the rostering copilot gateway", long_about = None)]
struct Cli {
    /// Gateway base URL
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// Question or quick-action label
        text: String,
    },

    /// List quick actions and suggestions
    #[command(name = "quick-actions")]
    QuickActions,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = HttpChatTransport::new(&cli.url);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat(transport).await?,
        Commands::Ask { text } => ask(transport, text).await,
        Commands::QuickActions => {
            let labels = fetch_labels(&transport).await;
            print_labels(&labels);
        }
    }

    Ok(())
}

async fn ask(transport: HttpChatTransport, text: String) {
    let mut panel = ChatPanel::new();
    if panel.send_user_text(&transport, &text).await {
        if let Some(reply) = panel.transcript().last() {
            println!("{}", reply.text());
        }
    }
}

async fn chat(transport: HttpChatTransport) -> Result<(), Box<dyn std::error::Error>> {
    let labels = fetch_labels(&transport).await;
    let (handle, _task) = spawn_panel(Arc::new(transport));
    handle.open().await?;

    println!("AI Copilot - type a question, /q N for a quick action, /actions, /reset, /quit");
    print_labels(&labels);

    let mut printed = print_new(&handle.wait_idle().await?.transcript, 0);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line, &labels.quick_actions) {
            Input::Nothing => continue,
            Input::Quit => break,
            Input::Actions => {
                print_labels(&labels);
                continue;
            }
            Input::Unknown(hint) => {
                println!("{hint}");
                continue;
            }
            Input::Reset => {
                handle.dispatch(PanelCommand::Reset).await?;
                let mut rx = handle.subscribe();
                let view = rx.wait_for(|v| v.transcript.len() == 1).await?.clone();
                printed = print_new(&view.transcript, 0);
                continue;
            }
            Input::Say(text) => handle.send_user_text(text).await?,
            Input::Quick(label) => handle.run_quick_action(label).await?,
        }

        printed = settle(&handle, printed).await?;
    }

    handle.close().await?;
    Ok(())
}

// Waits for the reply, then prints assistant entries not shown yet.
async fn settle(handle: &PanelHandle, printed: usize) -> Result<usize, Box<dyn std::error::Error>> {
    let view = handle.wait_idle().await?;
    Ok(print_new(&view.transcript, printed))
}

fn print_new(transcript: &[TranscriptEntry], from: usize) -> usize {
    for entry in transcript.iter().skip(from) {
        if entry.role() == Role::Assistant {
            println!("copilot: {}", entry.text());
        }
    }
    transcript.len()
}

async fn fetch_labels(transport: &HttpChatTransport) -> QuickActionLabels {
    match transport.quick_actions().await {
        Ok(labels) => labels,
        Err(e) => {
            warn!(error = %e, "Could not fetch quick actions, using built-in labels");
            QuickActionLabels {
                quick_actions: QuickActions::default().labels().map(String::from).collect(),
                suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            }
        }
    }
}

fn print_labels(labels: &QuickActionLabels) {
    println!("Quick actions:");
    for (i, label) in labels.quick_actions.iter().enumerate() {
        println!("  /q {}  {}", i + 1, label);
    }
    println!("Suggestions: {}", labels.suggestions.join(" | "));
}
