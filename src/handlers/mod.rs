pub mod add;
pub mod delete;
pub mod health;
pub mod list;

pub use add::add_handler;
pub use delete::delete_handler;
pub use health::{health_handler, root_handler};
pub use list::list_handler;
