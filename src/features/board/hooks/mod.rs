pub mod use_task_board;

pub use use_task_board::*;
