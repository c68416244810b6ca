pub mod config;
pub mod files;
pub mod seed;
pub mod store;

pub use config::{load_config, save_config, AppConfig};
pub use files::{atomic_write, config_file, ensure_board_dir, init_local_board, log_dir};
pub use seed::sample_tasks;
pub use store::{load_or_default, save, DynStore, FileStore, KeyValueStore, MemoryStore};

#[cfg(test)]
pub use store::{try_load, try_save};
