//! `notepad` command-line entry point.
//!
//! # Responsibility
//! - Parse flags/environment into an explicit `NotepadConfig`.
//! - Drive the interactive `new` flow and the `read` listings.
//! - Own the process exit code: core errors end here as `error: ...`.

use clap::{Parser, Subcommand};
use notepad_core::{
    default_log_level, init_logging, ConsoleIntake, Intake, NotepadConfig, NotepadError,
    NotepadService, PostFilter, PostId, PostRegistry, SqlitePostStore, StoredRow,
    DEFAULT_DB_FILE, DEFAULT_EXPORT_DIR,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const TABLE_CELL_WIDTH: usize = 40;
const TABLE_COLUMNS: [&str; 6] = ["id", "type", "created_at", "text", "url", "due_date"];

#[derive(Parser, Debug)]
#[command(name = "notepad", version, about = "Personal notepad: memos, tasks and links")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "NOTEPAD_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,
    /// Directory receiving one text file per saved post.
    #[arg(long, env = "NOTEPAD_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    export_dir: PathBuf,
    /// Directory for rolling log files; logging stays off when unset.
    #[arg(long, env = "NOTEPAD_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "NOTEPAD_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new post interactively.
    New {
        /// Post type; asked interactively when omitted.
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Show one post by id, or list stored rows.
    Read {
        #[arg(long, conflicts_with_all = ["kind", "limit", "json"])]
        id: Option<PostId>,
        /// Only rows of this post type.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Maximum number of rows.
        #[arg(long)]
        limit: Option<u32>,
        /// Print rows as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// List registered post types.
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &absolute(log_dir)?).map_err(CliError::Logging)?;
    }

    let config = NotepadConfig::new(cli.db, cli.export_dir);
    let registry = PostRegistry::with_default_types();
    let store = SqlitePostStore::with_registry(config.store.clone(), registry.clone());
    let service = NotepadService::new(store, registry, config.export_dir);

    match cli.command {
        Command::New { kind } => new_post(&service, kind),
        Command::Read { id: Some(id), .. } => read_one(&service, id),
        Command::Read {
            id: None,
            kind,
            limit,
            json,
        } => read_many(&service, PostFilter { kind, limit }, json),
        Command::Types => {
            for type_name in service.registry().type_names() {
                println!("{type_name}");
            }
            Ok(())
        }
    }
}

fn new_post(
    service: &NotepadService<SqlitePostStore>,
    kind: Option<String>,
) -> Result<(), CliError> {
    let mut intake = ConsoleIntake::stdio();
    let type_name = match kind {
        Some(kind) => kind,
        None => choose_type(service.registry().type_names(), &mut intake)?,
    };

    let saved = service.compose(&type_name, &mut intake)?;
    println!("Saved {type_name}, id = {}", saved.id);
    println!("Exported to {}", saved.export_path.display());
    Ok(())
}

fn choose_type(type_names: Vec<&'static str>, intake: &mut dyn Intake) -> Result<String, CliError> {
    let menu = type_names
        .iter()
        .enumerate()
        .map(|(index, name)| format!("\t{index}. {name}"))
        .collect::<Vec<_>>()
        .join("\n");
    let answer = intake
        .ask(&format!("What would you like to write?\n{menu}"))
        .map_err(NotepadError::from)?;

    answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| type_names.get(index))
        .map(|name| name.to_string())
        .ok_or(CliError::InvalidChoice(answer))
}

fn read_one(service: &NotepadService<SqlitePostStore>, id: PostId) -> Result<(), CliError> {
    match service.get_post(id)? {
        Some(post) => {
            println!("{} record, id = {id}", post.type_name());
            for line in post.to_lines() {
                println!("{line}");
            }
        }
        None => println!("No post with id {id}"),
    }
    Ok(())
}

fn read_many(
    service: &NotepadService<SqlitePostStore>,
    filter: PostFilter,
    json: bool,
) -> Result<(), CliError> {
    let rows = service.list_rows(&filter)?;
    if json {
        let rendered = serde_json::to_string_pretty(&rows).map_err(CliError::Json)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", table_line(TABLE_COLUMNS.iter().map(|name| name.to_string())));
    for row in &rows {
        println!("{}", table_line(row_cells(row)));
    }
    Ok(())
}

fn row_cells(row: &StoredRow) -> impl Iterator<Item = String> + '_ {
    TABLE_COLUMNS.iter().map(move |column| match *column {
        "id" => row.id.to_string(),
        name => row.columns.text(name).unwrap_or_default().to_string(),
    })
}

fn table_line(cells: impl Iterator<Item = String>) -> String {
    cells
        .map(|cell| {
            let flat = cell.replace(['\n', '\r'], " ");
            let clipped: String = flat.chars().take(TABLE_CELL_WIDTH).collect();
            format!("| {clipped} ")
        })
        .collect::<String>()
        + "|"
}

fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(CliError::Io)?;
    Ok(cwd.join(path))
}

#[derive(Debug)]
enum CliError {
    Notepad(NotepadError),
    InvalidChoice(String),
    Logging(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notepad(err) => write!(f, "{err}"),
            Self::InvalidChoice(answer) => write!(f, "no post type numbered `{answer}`"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl From<NotepadError> for CliError {
    fn from(value: NotepadError) -> Self {
        Self::Notepad(value)
    }
}
