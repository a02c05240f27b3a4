//! Command implementations.

pub mod advise;
pub mod audit;
pub mod decide;
pub mod graph;

pub use self::advise::{execute_dismiss, execute_suggest};
pub use self::audit::execute_check;
pub use self::decide::{execute_gate, execute_status};
pub use self::graph::{execute_impact, execute_link, execute_relations, execute_stats, execute_unlink};
