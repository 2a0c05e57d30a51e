pub mod contribution;
pub mod event;
pub mod message;
pub mod session;
pub mod user;

pub use contribution::{Contribution, CreateContributionRequest};
pub use event::{CreateEventRequest, Event, EventWithStats, PublicEvent};
pub use message::{CreateMessageRequest, Message, PublicMessage};
pub use session::Session;
pub use user::{PublicUser, User};
