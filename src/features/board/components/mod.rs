pub mod header;
pub mod subtask_list;
pub mod task_card;

pub use header::BoardHeader;
pub use subtask_list::SubtaskList;
pub use task_card::TaskCard;
