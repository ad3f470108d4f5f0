mod error;
mod message;
mod room;
mod topic;
mod user;

pub use error::CommonError;
use error::Result;

pub use message::{Message, MessageBody};
pub use room::{parse_description, Room, RoomName, RoomRef};
pub use topic::{Topic, TopicName, TopicSummary};
pub use user::{parse_email, validate_new_password, User, UserName, UserRef};
