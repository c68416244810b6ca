pub mod collection;
pub mod enums;
pub mod filter;
pub mod task;
pub mod views;

pub use collection::{Change, TaskCollection};
pub use enums::{TaskStatus, UiMode, View};
pub use filter::{filter_tasks, TaskFilters};
pub use task::Task;
pub use views::{board_columns, status_badge, tag_line, truncate, BoardColumn};
