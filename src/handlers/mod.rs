pub mod contribution_handlers;
pub mod event_handlers;
pub mod message_handlers;

pub use contribution_handlers::create_contribution_handler;
pub use event_handlers::{
    create_event_handler, creator_event_handler, creator_list_handler, public_event_handler,
};
pub use message_handlers::create_message_handler;
