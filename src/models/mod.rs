pub mod message;
pub mod user;

pub use message::{Message, NewMessageRequest};
pub use user::{ReceivedMessage, RegisterRequest, SentMessage, User, UserSummary};
