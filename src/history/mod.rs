pub mod ring;
pub mod shared;
pub mod storage;

pub use ring::{History, HISTORY_CAPACITY, HISTORY_VERSION};
pub use shared::SharedHistory;
pub use storage::{get_history_path, load_history, save_history};
