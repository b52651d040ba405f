//! taylor - terminal chat client for the Aetherium assistant

mod config;
mod locale;

use std::io::{BufRead, Write};

use anyhow::Context as _;
use clap::Parser;
use taylor_chat::{ChatClient, Conversation, Error, ReplySink};

use crate::config::Config;
use crate::locale::{Locale, t};

/// taylor - streaming chat with the Aetherium assistant
#[derive(Parser, Debug)]
#[command(name = "taylor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Bearer token for the endpoint (or TAYLOR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Interface language (ru, en, fr, es)
    #[arg(short, long)]
    locale: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

/// Prints only the unseen suffix of the accumulated reply
#[derive(Default)]
struct StdoutSink {
    printed: usize,
}

impl ReplySink for StdoutSink {
    fn update(&mut self, content: &str) {
        print!("{}", &content[self.printed..]);
        let _ = std::io::stdout().flush();
        self.printed = content.len();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("taylor=debug,taylor_chat=debug")
            .init();
    }

    if args.init_config {
        let path = Config::init().context("failed to initialize config file")?;
        println!("Config file: {}", path.display());
        return Ok(());
    }

    let config = Config::load();

    let endpoint = args.endpoint.or(config.endpoint).context(
        "no chat endpoint configured; pass --endpoint or set it in config.toml",
    )?;
    let api_key = args
        .api_key
        .or_else(|| std::env::var("TAYLOR_API_KEY").ok())
        .or(config.api_key);
    let locale = args
        .locale
        .or(config.locale)
        .map(|tag| Locale::from_tag(&tag))
        .unwrap_or_default();

    let mut client = ChatClient::new(endpoint);
    if let Some(key) = api_key {
        client = client.with_api_key(key);
    }

    let greeting = t(locale, "chat.greeting");
    let mut conversation = Conversation::with_greeting(greeting.as_str());
    println!("{}", greeting);

    let stdin = std::io::stdin();
    loop {
        print!("{}", t(locale, "chat.prompt"));
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        // Input is only read between turns, so the library-side guard
        // against overlapping turns never fires here.
        let mut sink = StdoutSink::default();
        match client.send_turn(&mut conversation, input, &mut sink).await {
            Ok(()) => println!(),
            Err(e) => {
                if sink.printed > 0 {
                    println!();
                }
                eprintln!("{}", present_error(locale, &e));
            }
        }
    }

    Ok(())
}

/// Map a turn failure to a localized, user-facing message
fn present_error(locale: Locale, error: &Error) -> String {
    if error.is_rate_limited() {
        t(locale, "error.rate_limited")
    } else if error.is_quota_exhausted() {
        t(locale, "error.quota")
    } else {
        format!("{}: {}", t(locale, "error.generic"), error)
    }
}
