mod account;
mod error;
mod interview;
mod project;
mod question;

pub use account::Account;
pub use error::ModelError;
pub use interview::Interview;
pub use project::{Project, slugify};
pub use question::{Question, QuestionKind};
