//! chatdoc-rs CLI application
//!
//! Command-line interface for the chatdoc library.

use chatdoc::api::{OpenAIChat, generate_response, submit};
use chatdoc::ui::{QaForm, draw, render_transcript, with_spinner};
use chatdoc::{ChatSession, Config, Credential, UploadedFile};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatdoc-rs")]
#[command(about = "Chat with an LLM, or ask one question about a document")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL for OpenAI-compatible APIs
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat that keeps the conversation history
    Chat {
        /// Chat model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Answer one question about a document
    Ask {
        /// Document to upload (text or PDF)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Question to ask about the document
        #[arg(short, long, default_value = "")]
        query: String,

        /// OpenAI API key (prompted for when omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Number of chunks stuffed into the prompt
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,
    },
}

/// Exit status for failures after startup (bad config, unreadable file, remote error)
const EXIT_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Chat { model } => {
            let credential = startup_credential();
            let mut config = load_config(cli.config, cli.base_url)?;
            if let Some(model) = model {
                config.chat.model = model;
            }
            chat_command(credential, config).await?;
        }
        Commands::Ask {
            file,
            query,
            api_key,
            top_k,
            chunk_size,
        } => {
            let mut config = load_config(cli.config, cli.base_url)?;
            if let Some(top_k) = top_k {
                config.retrieval.top_k = top_k;
            }
            if let Some(chunk_size) = chunk_size {
                config.chunking.chunk_size = chunk_size;
            }
            config.validate()?;
            ask_command(file, query, api_key, config).await?;
        }
    }

    Ok(())
}

/// Load `.env` and require a non-empty key, exiting with status 1 otherwise
fn startup_credential() -> Credential {
    dotenvy::dotenv().ok();

    match Credential::from_env() {
        Ok(credential) => {
            println!("{} is set", chatdoc::credential::API_KEY_VAR);
            credential
        }
        Err(_) => {
            println!("{} is not set", chatdoc::credential::API_KEY_VAR);
            std::process::exit(1);
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if base_url.is_some() {
        config.api.base_url = base_url;
    }
    config.validate()?;
    Ok(config)
}

async fn chat_command(
    credential: Credential,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = OpenAIChat::new(&credential, &config.api, &config.chat);
    let mut session = ChatSession::new(config.chat.system_prompt.as_str());
    let mut shown = 0;

    println!("Your own ChatGPT 🤖");
    println!("   Model: {}", model.model());
    println!("   Type /help for commands, /quit to exit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Your message: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);

        match input {
            "/quit" | "/exit" => break,
            "/help" => {
                println!("Commands:");
                println!("  /clear  - Start a new conversation");
                println!("  /help   - Show this help");
                println!("  /quit   - End session");
                continue;
            }
            "/clear" => {
                session.clear();
                shown = 0;
                println!("Conversation history cleared.");
                continue;
            }
            _ => {}
        }

        // A failed exchange leaves the history as it was before the message.
        match with_spinner("Thinking...", submit(session.clone(), input, &model)).await {
            Ok(next) => session = next,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        }

        let rendered = render_transcript(session.messages());
        println!();
        draw(&mut stdout, &rendered[shown..])?;
        shown = rendered.len();
    }

    println!("👋 Goodbye!");
    Ok(())
}

async fn ask_command(
    file: Option<PathBuf>,
    query: String,
    api_key: Option<String>,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = QaForm::new().with_query(query);
    if let Some(file) = file {
        form = form.with_document(UploadedFile::from_path(&file)?);
    }

    if form.is_key_field_enabled() {
        let key = match api_key {
            Some(key) => key,
            None => prompt_api_key()?,
        };
        form = form.with_api_key(Credential::new(key));
    }

    if let Some(reason) = form.disabled_reason() {
        eprintln!("Submit is disabled: {}", reason);
        return Ok(());
    }

    let Some((document, query, credential)) = form.submit() else {
        return Ok(());
    };

    let response = with_spinner(
        "Calculating...",
        generate_response(&document, credential, &query, &config),
    )
    .await?;

    println!("{}", response);
    Ok(())
}

/// Ask for the key without echoing it; piped input is read as a plain line
fn prompt_api_key() -> io::Result<String> {
    const PROMPT: &str = "OpenAI API Key: ";

    if io::stdin().is_terminal() {
        return Ok(rpassword::prompt_password(PROMPT)?.trim().to_string());
    }

    eprint!("{}", PROMPT);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
