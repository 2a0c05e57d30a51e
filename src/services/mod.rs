pub mod contribution_service;
pub mod email_service;
pub mod event_service;
pub mod magic_link_service;
pub mod message_service;
pub mod session_service;

pub use contribution_service::{ContributionService, ContributionServiceError};
pub use email_service::{create_email_service, EmailError, EmailService};
pub use event_service::{EventService, EventServiceError};
pub use magic_link_service::{
    IssueMagicLinkRequest, IssuedMagicLink, MagicLinkError, MagicLinkService, VerifiedLogin,
};
pub use message_service::{MessageService, MessageServiceError};
pub use session_service::SessionService;
