//! One repository per entity. Repositories own the SQL; all
//! multi-row mutations run inside a single transaction.

mod proposal_repo;
mod subtask_repo;
mod task_repo;
mod user_repo;

pub use proposal_repo::ProposalRepo;
pub use subtask_repo::SubtaskRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
