//! health-chat: interactive terminal client for the health advisor
//!
//! Run with: cargo run -p health-advisor-cli --bin health-chat

use anyhow::Context;
use clap::Parser;
use console::style;
use health_advisor::{Message, Role};
use health_advisor_cli::{init_tracing, AdviceClient, ChatSession, TurnOutcome, DEFAULT_URL};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "health-chat")]
#[command(author, version, about = "Chat with the HealthCare Assistant", long_about = None)]
struct Cli {
    /// Advice server base URL
    #[arg(long, env = "HEALTH_ADVISOR_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60")]
    timeout: u64,

    /// PDF report to attach from the first turn
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long)]
    verbose: bool,
}

enum Command {
    Attach(PathBuf),
    Detach,
    History,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let rest = line.strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    Some(match name {
        "attach" if !arg.is_empty() => Command::Attach(PathBuf::from(arg)),
        "detach" => Command::Detach,
        "history" => Command::History,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    })
}

fn print_banner(client: &AdviceClient) {
    println!();
    println!("{}", style("🏥 HealthCare Assistant").bold().cyan());
    println!("Ask any health-related questions or attach your medical reports for personalized advice.");
    println!(
        "{} This is an AI assistant and not a substitute for professional medical advice.",
        style("Note:").bold()
    );
    println!();
    println!("{}", style("💡 Tips").bold());
    println!("  - Be specific with your health questions");
    println!("  - Attach relevant medical reports for more accurate advice");
    println!("  - For emergencies, contact healthcare professionals immediately");
    println!("  - Keep your personal information private");
    println!();
    println!("{}", style("⚠️  Disclaimer").bold());
    println!("  This is an AI assistant and not a substitute for professional medical advice.");
    println!("  Always consult with a qualified healthcare provider for any health concerns.");
    println!();
    println!("Connected to {}", style(client.base_url()).dim());
    println!("Type /help for commands.\n");
}

fn print_help() {
    println!("  /attach <path>  Attach a PDF medical report to following questions");
    println!("  /detach         Stop sending the attached report");
    println!("  /history        Show this session's conversation");
    println!("  /help           Show this help");
    println!("  /quit           Leave the chat");
}

fn print_message(message: &Message) {
    match message.role() {
        Role::User => println!("{} {}", style("You:").bold().green(), message.content()),
        Role::Assistant => {
            println!("{}", style("Assistant:").bold().cyan());
            println!("{}\n", message.content());
        }
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = AdviceClient::new(&cli.url, Duration::from_secs(cli.timeout))
        .context("Failed to create advice client")?;
    let mut session = ChatSession::new(client);

    print_banner(session.client());

    if let Some(path) = &cli.file {
        let attached = session.attach(path).await?;
        println!("📄 Attached {}\n", attached.filename());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(format!("{} ", style("›").bold()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = parse_command(input) {
            match command {
                Command::Attach(path) => match session.attach(&path).await {
                    Ok(attached) => println!("📄 Attached {}\n", attached.filename()),
                    Err(e) => println!("{} {:#}\n", style("❌").red(), e),
                },
                Command::Detach => match session.detach() {
                    Some(previous) => println!("Detached {}\n", previous.filename()),
                    None => println!("No report attached\n"),
                },
                Command::History => {
                    if session.history().is_empty() {
                        println!("No messages yet\n");
                    }
                    for message in session.history() {
                        print_message(message);
                    }
                }
                Command::Help => print_help(),
                Command::Quit => break,
                Command::Unknown(text) => {
                    println!("Unknown command {}; type /help for commands\n", text)
                }
            }
            continue;
        }

        let spinner = thinking_spinner();
        let outcome = session.send(&line).await;
        spinner.finish_and_clear();

        if let Some(reply) = session.last_message() {
            match outcome {
                TurnOutcome::Answered => print_message(reply),
                TurnOutcome::Failed | TurnOutcome::ConnectionFailed => {
                    println!("{} {}\n", style("❌").red(), style(reply.content()).red())
                }
            }
        }
    }

    println!("Take care!");
    Ok(())
}
