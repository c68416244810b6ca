mod actions;
mod app;
mod board;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod scheduler;
mod ticker;
mod ui;

use anyhow::{bail, Context, Result};
use app::AppState;
use board::Board;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{status_badge, tag_line, Change, Task, TaskFilters, TaskStatus};
use log::{error, info, warn};
use persistence::{
    config_file, ensure_board_dir, init_local_board, load_config, log_dir, sample_tasks,
    save_config, AppConfig, DynStore, FileStore, MemoryStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kanboard")]
#[command(about = "A terminal kanban board and backlog for small teams", long_about = None)]
struct Cli {
    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .kanboard directory in the current directory
    Init,
    /// Print tasks, optionally filtered
    List {
        #[arg(short, long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Case-insensitive text search
        #[arg(short = 'x', long)]
        text: Option<String>,
        #[arg(short, long)]
        assignee: Option<String>,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Add a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        assignee: String,
        #[arg(short, long, value_parser = parse_status, default_value = "backlog")]
        status: TaskStatus,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Move a task to a status, optionally at a position within that status
    Move {
        /// Task id or unique id prefix
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
        /// Position among tasks of the target status (default: end)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
    },
    /// Replace all tasks with the sample data
    Reset,
}

fn parse_status(value: &str) -> std::result::Result<TaskStatus, String> {
    TaskStatus::from_tag(value).ok_or_else(|| {
        format!(
            "unknown status `{}` (expected backlog, scheduled, in-progress or done)",
            value
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let board_dir = init_local_board()?;
        save_config(config_file(&board_dir), &AppConfig::default())?;
        println!("Initialized board directory: {}", board_dir.display());
        println!();
        println!("Kanboard will now use this local directory for task storage.");
        println!("Run 'kanboard' to open the board.");
        return Ok(());
    }

    let (store, config) = open_store(cli.ephemeral)?;
    let mut board = Board::init(store, &config.tasks_key, sample_tasks());

    let result = match cli.command {
        None => return run_tui(board, &config),
        Some(Commands::Init) => Ok(()),
        Some(Commands::List {
            status,
            text,
            assignee,
            tag,
        }) => {
            let filters = TaskFilters {
                text: text.unwrap_or_default(),
                assignee: assignee.unwrap_or_default(),
                tag: tag.unwrap_or_default(),
            };
            list_tasks(&board, status, &filters);
            Ok(())
        }
        Some(Commands::Add {
            title,
            description,
            assignee,
            status,
            tags,
        }) => add_task(&mut board, title, description, assignee, status, tags),
        Some(Commands::Move { id, status, index }) => {
            move_task(&mut board, &id, status, index)
        }
        Some(Commands::Delete { id }) => delete_task(&mut board, &id),
        Some(Commands::Reset) => {
            board.replace_all(sample_tasks());
            println!("Board reset to {} sample tasks", board.tasks().len());
            Ok(())
        }
    };

    board.teardown();
    result
}

/// Resolve the store and config: file-backed in the board directory, or
/// in memory for `--ephemeral`
fn open_store(ephemeral: bool) -> Result<(DynStore, AppConfig)> {
    if ephemeral {
        return Ok((Box::new(MemoryStore::new()), AppConfig::default()));
    }

    let board_dir = ensure_board_dir()?;
    let config_path = config_file(&board_dir);
    let loaded = load_config(&config_path)
        .with_context(|| format!("Failed to read config in {}", board_dir.display()))?;
    let config = loaded.config;
    logging::init_logging(&config.log_level, &log_dir(&board_dir))?;
    if let Some(reason) = loaded.fallback_reason {
        warn!(
            "event=config_load module=main status=fallback path={} error={}",
            config_path.display(),
            reason
        );
    }

    let store = FileStore::open(&board_dir)?;
    info!(
        "event=store_open module=main status=ok dir={}",
        store.dir().display()
    );
    Ok((Box::new(store), config))
}

fn list_tasks(board: &Board<DynStore>, status: Option<TaskStatus>, filters: &TaskFilters) {
    let tasks: Vec<Task> = domain::filter_tasks(board.tasks(), filters)
        .into_iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect();

    if tasks.is_empty() {
        println!("No tasks");
        return;
    }
    for task in &tasks {
        println!("{}", format_task_row(task));
    }
}

/// Format: 1a2b3c4d (IN PROGRESS) Write proposal @ana [api]
fn format_task_row(task: &Task) -> String {
    let mut row = format!(
        "{} {:<14}{}",
        short_id(&task.id),
        status_badge(task.status),
        task.title
    );
    if !task.assignee.is_empty() {
        row.push_str(&format!(" @{}", task.assignee));
    }
    if !task.tags.is_empty() {
        row.push(' ');
        row.push_str(&tag_line(&task.tags));
    }
    row
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Full id for an exact id or a unique prefix
fn resolve_id(board: &Board<DynStore>, prefix: &str) -> Result<String> {
    if board.get(prefix).is_some() {
        return Ok(prefix.to_string());
    }
    let matches: Vec<&Task> = board
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => bail!("No task with id {}", prefix),
        _ => bail!("Id prefix {} matches {} tasks", prefix, matches.len()),
    }
}

fn add_task(
    board: &mut Board<DynStore>,
    title: String,
    description: String,
    assignee: String,
    status: TaskStatus,
    tags: Vec<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title cannot be empty");
    }
    let task = Task::new(title, status)
        .with_description(description)
        .with_assignee(assignee)
        .with_tags(tags);
    let id = task.id.clone();
    board.add_task(task);
    println!("Task added: {}", short_id(&id));
    Ok(())
}

fn move_task(
    board: &mut Board<DynStore>,
    id: &str,
    status: TaskStatus,
    index: Option<usize>,
) -> Result<()> {
    let id = resolve_id(board, id)?;
    match board.move_task(&id, status, index.unwrap_or(usize::MAX)) {
        Change::Applied => println!("Task moved to {}", status.label()),
        Change::NotFound => println!("No task with id {}", id),
    }
    Ok(())
}

fn delete_task(board: &mut Board<DynStore>, id: &str) -> Result<()> {
    let id = resolve_id(board, id)?;
    match board.delete_task(&id) {
        Change::Applied => println!("Task deleted"),
        Change::NotFound => println!("No task with id {}", id),
    }
    Ok(())
}

fn run_tui(board: Board<DynStore>, config: &AppConfig) -> Result<()> {
    let mut app = AppState::new(board, config);

    // Panics must not print over the raw-mode screen, file logging or not
    logging::install_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Apply any half-typed filter, then flush everything
    app.finish_filter_input();
    app.shutdown();

    if let Err(err) = &result {
        error!("event=app_exit module=main status=error error={:#}", err);
        eprintln!("Error: {}", err);
    }
    info!("event=app_exit module=main status=ok");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn memory_board() -> Board<DynStore> {
        let store: DynStore = Box::new(MemoryStore::new());
        Board::init(
            store,
            "tasks",
            vec![
                Task::new("Alpha".to_string(), TaskStatus::Scheduled),
                Task::new("Beta".to_string(), TaskStatus::Done),
            ],
        )
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from([
            "kanboard", "add", "Ship it", "--status", "in-progress", "--tag", "a", "--tag", "b",
        ])
        .unwrap();
        let Some(Commands::Add { title, status, tags, .. }) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(title, "Ship it");
        assert_eq!(status, TaskStatus::InProgress);
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["kanboard", "move", "abc", "later"]).is_err());
    }

    #[test]
    fn test_cli_ephemeral_is_global() {
        let cli = Cli::try_parse_from(["kanboard", "list", "--ephemeral"]).unwrap();
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let board = memory_board();
        let id = board.tasks()[0].id.clone();
        assert_eq!(resolve_id(&board, &id[..8]).unwrap(), id);
        assert!(resolve_id(&board, "zzzz").is_err());
        // Every id matches the empty prefix
        assert!(resolve_id(&board, "").is_err());
    }

    #[test]
    fn test_add_requires_title() {
        let mut board = memory_board();
        let err = add_task(
            &mut board,
            "  ".to_string(),
            String::new(),
            String::new(),
            TaskStatus::Backlog,
            Vec::new(),
        );
        assert!(err.is_err());
        assert_eq!(board.tasks().len(), 2);
    }

    #[test]
    fn test_move_defaults_to_end() {
        let mut board = memory_board();
        let id = board.tasks()[0].id.clone();
        move_task(&mut board, &id, TaskStatus::Done, None).unwrap();
        let titles: Vec<&str> = board.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Alpha"]);
        assert_eq!(board.tasks()[1].status, TaskStatus::Done);
    }

    #[test]
    fn test_format_task_row() {
        let task = Task::new("Write docs".to_string(), TaskStatus::Done)
            .with_assignee("Ana")
            .with_tags(["docs"]);
        let row = format_task_row(&task);
        assert!(row.starts_with(&task.id[..8]));
        assert!(row.contains("(DONE)"));
        assert!(row.ends_with("@Ana [docs]"));
    }
}
