pub mod auth_handlers;
pub mod mention_handlers;
pub mod message_handlers;
pub mod project_handlers;
pub mod project_task_handlers;
pub mod task_handlers;
pub mod thread_handlers;
pub mod thread_member_handlers;
pub mod user_handlers;
