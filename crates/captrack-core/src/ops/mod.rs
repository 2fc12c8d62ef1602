pub mod capability_ops;
pub mod milestone_ops;
pub mod notification_ops;
pub mod plan_ops;
pub mod store;
pub mod user_ops;

pub use store::Store;
