use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use fs_warden::Result;
use fs_warden::ops::Context;
use fs_warden::policy::PathPolicy;
use fs_warden::policy_io;

#[derive(Debug, Parser)]
#[command(name = "fs-warden")]
#[command(about = "Policy-guarded filesystem operations (read/write/list/delete/mkdir).")]
struct Cli {
    /// Policy file (.toml or .json); defaults to the stock policy rooted at the
    /// current directory.
    #[arg(long)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Read {
        path: String,
    },
    Write {
        path: String,
        content: String,
    },
    List {
        path: String,
        #[arg(long, default_value_t = false)]
        recursive: bool,
    },
    Delete {
        path: String,
    },
    Mkdir {
        path: String,
        #[arg(long, default_value_t = false)]
        recursive: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let policy = match cli.policy {
        Some(path) => policy_io::load_policy(path)?,
        None => PathPolicy::with_working_dir(std::env::current_dir()?),
    };
    let ctx = Context::new(policy)?;

    let result = match cli.command {
        Command::Read { path } => ctx.read_file(&json!({ "path": path })),
        Command::Write { path, content } => {
            ctx.write_file(&json!({ "path": path, "content": content }))
        }
        Command::List { path, recursive } => {
            ctx.list_files(&json!({ "path": path, "recursive": recursive }))
        }
        Command::Delete { path } => ctx.delete_file(&json!({ "path": path })),
        Command::Mkdir { path, recursive } => {
            ctx.create_directory(&json!({ "path": path, "recursive": recursive }))
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.success)
}
