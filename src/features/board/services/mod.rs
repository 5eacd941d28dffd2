pub mod drag;
pub mod task_operations;

pub use drag::*;
pub use task_operations::TaskBoard;
