//! Anonymous discussion board on the command line.
//!
//! State lives in a data directory (`.anontalk/` by default) holding
//! `config.toml` and `storage.json`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use anontalk::board::Board;
use anontalk::exit_codes;
use anontalk::io::config::load_config;
use anontalk::io::init::{BoardPaths, DEFAULT_DATA_DIR, InitOptions, init_board};
use anontalk::io::storage::FileStore;
use anontalk::logging;
use anontalk::model::NewThread;
use anontalk::render::Renderer;

#[derive(Parser)]
#[command(name = "anontalk", version, about = "Anonymous discussion board")]
struct Cli {
    /// Directory holding config.toml and storage.json.
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the data directory with default config and empty storage.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// List groups and whether you have joined them.
    Groups,
    /// Join a group.
    Join { group: String },
    /// Leave a group.
    Leave { group: String },
    /// Show a group's threads and replies.
    Threads {
        group: String,
        /// Print thread content without truncation.
        #[arg(long)]
        full: bool,
    },
    /// Create a thread; prints the new thread id.
    Post {
        group: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Image as a data URL, stored as-is.
        #[arg(long)]
        image: Option<String>,
    },
    /// Reply to a thread; prints the new reply id.
    Reply { thread: String, content: String },
    /// Delete a thread and its replies.
    DeleteThread { thread: String },
    /// Delete a reply from a thread.
    DeleteReply { thread: String, reply: String },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let paths = BoardPaths::new(&cli.data_dir);
    match cli.command {
        Command::Init { force } => {
            init_board(&paths.data_dir, &InitOptions { force })?;
            println!("initialized {}", paths.data_dir.display());
            Ok(exit_codes::OK)
        }
        Command::Groups => {
            let (board, renderer) = open(&paths)?;
            println!("{}", renderer.groups(&board.groups())?);
            Ok(exit_codes::OK)
        }
        Command::Join { group } => {
            let (mut board, _) = open(&paths)?;
            board.join(&group)?;
            Ok(exit_codes::OK)
        }
        Command::Leave { group } => {
            let (mut board, _) = open(&paths)?;
            board.leave(&group)?;
            Ok(exit_codes::OK)
        }
        Command::Threads { group, full } => {
            let (board, renderer) = open(&paths)?;
            println!("{}", renderer.group_page(&board.group_page(&group), full)?);
            Ok(exit_codes::OK)
        }
        Command::Post {
            group,
            title,
            content,
            image,
        } => {
            let (mut board, _) = open(&paths)?;
            let new = NewThread {
                group_id: group,
                title,
                content,
                image,
            };
            match board.create_thread(new)? {
                Some(thread) => {
                    println!("{}", thread.id);
                    Ok(exit_codes::OK)
                }
                None => rejected("title and content must not be empty"),
            }
        }
        Command::Reply { thread, content } => {
            let (mut board, _) = open(&paths)?;
            match board.add_reply(&thread, &content)? {
                Some(reply) => {
                    println!("{}", reply.id);
                    Ok(exit_codes::OK)
                }
                None if content.is_empty() => rejected("reply must not be empty"),
                None => rejected(&format!("no thread '{thread}'")),
            }
        }
        Command::DeleteThread { thread } => {
            let (mut board, _) = open(&paths)?;
            let removed = board.delete_thread(&thread)?;
            debug!(thread = %thread, removed, "delete-thread");
            Ok(exit_codes::OK)
        }
        Command::DeleteReply { thread, reply } => {
            let (mut board, _) = open(&paths)?;
            let removed = board.delete_reply(&thread, &reply)?;
            debug!(thread = %thread, reply = %reply, removed, "delete-reply");
            Ok(exit_codes::OK)
        }
    }
}

/// Load config and storage from the data directory. Neither has to exist yet.
fn open(paths: &BoardPaths) -> Result<(Board<FileStore>, Renderer)> {
    let config = load_config(&paths.config_path)?;
    let store = FileStore::open(&paths.storage_path)?;
    let board = Board::open(store, &config)?;
    let renderer = Renderer::new(config.preview_chars)?;
    Ok((board, renderer))
}

fn rejected(reason: &str) -> Result<i32> {
    eprintln!("rejected: {reason}");
    Ok(exit_codes::REJECTED)
}
