//! Command-line front end for Cloud Notes.
//!
//! # Responsibility
//! - Share free text as a password-protected link and open such links.
//! - Run a scripted editor session against the in-memory store.

use clap::{Parser, Subcommand};
use cloudnote_core::config::normalize_base_url;
use cloudnote_core::{
    derive_title, generate_share_link, init_logging, init_stderr_logging, AccessGate, AppConfig,
    AppMode, Session, SessionEvent, SessionOutput, ShareSource, SharedNote,
    DEFAULT_TITLE_LEN,
};
use log::info;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cloudnote", version, about = "Password-protected note sharing")]
struct Cli {
    /// Overrides CLOUDNOTE_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text into a share link.
    Share {
        #[arg(short, long)]
        password: String,

        #[arg(long, env = "CLOUDNOTE_BASE_URL")]
        base_url: Option<String>,

        /// Read the text from a file instead of the argument.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the bare token instead of the full URL.
        #[arg(long, default_value_t = false)]
        token_only: bool,

        /// Text to share; stdin is read when neither this nor --file is given.
        text: Option<String>,
    },
    /// Decode a share link, query string or bare token.
    Open {
        link: String,

        #[arg(short, long)]
        password: String,
    },
    /// Print the list title derived for a note.
    Title {
        text: String,

        #[arg(long, default_value_t = DEFAULT_TITLE_LEN)]
        max_len: usize,
    },
    /// Run a scripted editor session and print each step.
    Demo {
        /// Password for the access gate, when CLOUDNOTE_ACCESS_PASSWORD is set.
        #[arg(long)]
        unlock: Option<String>,

        /// Share password used by the demo.
        #[arg(long, default_value = "1234")]
        share_password: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level.as_str(), dir)?,
        None => init_stderr_logging(config.log_level.as_str())?,
    }

    match cli.command {
        Commands::Share {
            password,
            base_url,
            file,
            token_only,
            text,
        } => {
            let base_url = match base_url {
                Some(raw) => normalize_base_url(raw.as_str())?,
                None => config.base_url,
            };
            let text = read_text(text, file)?;
            let link = generate_share_link(
                &[],
                &ShareSource::Content(text),
                password.as_str(),
                base_url.as_str(),
            )?;
            if token_only {
                println!("{}", link.token);
            } else {
                println!("{}", link.url);
            }
        }
        Commands::Open { link, password } => {
            let mut viewer = SharedNote::open(link.as_str())?;
            println!("{}", viewer.unlock(password.as_str())?);
        }
        Commands::Title { text, max_len } => {
            println!("{}", derive_title(text.as_str(), max_len));
        }
        Commands::Demo {
            unlock,
            share_password,
        } => {
            AccessGate::new(config.access_password.clone())
                .check(unlock.as_deref().unwrap_or_default())?;
            run_demo(config.base_url, share_password.as_str())?;
        }
    }
    Ok(())
}

fn read_text(text: Option<String>, file: Option<PathBuf>) -> Result<String, Box<dyn Error>> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()).into());
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn run_demo(base_url: String, share_password: &str) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(base_url);
    info!("event=demo_start module=cli status=ok");

    let groceries = created_id(session.handle(SessionEvent::CreateNote {
        content: Some("Buy milk\nand eggs".to_string()),
    })?)?;
    let chores = created_id(session.handle(SessionEvent::CreateNote {
        content: Some("Call the plumber about the kitchen sink leak".to_string()),
    })?)?;
    print_list(&session, "after create");

    session.handle(SessionEvent::StartEdit {
        id: groceries.clone(),
    })?;
    session.handle(SessionEvent::SaveEdit {
        id: groceries.clone(),
        content: "Buy oat milk\nand eggs".to_string(),
    })?;
    print_list(&session, "after edit");

    session.handle(SessionEvent::Search {
        query: "MILK".to_string(),
    })?;
    print_list(&session, "search `MILK`");
    session.handle(SessionEvent::Search {
        query: String::new(),
    })?;

    session.handle(SessionEvent::RequestDelete { id: chores.clone() })?;
    println!("[view] {}", session.view().label());
    session.handle(SessionEvent::ConfirmDelete { id: chores })?;
    print_list(&session, "after delete");

    let link = match session.handle(SessionEvent::GenerateShareLink {
        source: ShareSource::AllNotes,
        password: share_password.to_string(),
    })? {
        SessionOutput::Share(link) => link,
        other => return Err(unexpected_output("generate_share_link", &other)),
    };
    println!("[share] {}", link.url);

    let query = link.url.split_once('?').map(|(_, query)| query).unwrap_or("");
    let AppMode::SharedViewer(token) = AppMode::from_query(query) else {
        return Err(format!("share link `{}` did not route to the viewer", link.url).into());
    };
    let mut viewer = SharedNote::from_token(token.as_str())?;
    if let Err(err) = viewer.unlock("wrong") {
        println!("[open] wrong password rejected: {err}");
    }
    println!("[open] {:?}", viewer.unlock(share_password)?);
    Ok(())
}

fn created_id(output: SessionOutput) -> Result<String, Box<dyn Error>> {
    match output {
        SessionOutput::Created(detail) => Ok(detail.id),
        other => Err(unexpected_output("create_note", &other)),
    }
}

fn unexpected_output(event: &str, output: &SessionOutput) -> Box<dyn Error> {
    format!("`{event}` produced unexpected output {output:?}").into()
}

fn print_list(session: &Session, label: &str) {
    println!("[{label}]");
    for row in session.list() {
        println!("  {:<32} {:>5} chars  {}", row.title, row.length, row.id);
    }
}
