pub mod current_session;
pub mod session;
pub mod user;

pub use current_session::CurrentSession;
pub use session::{ResolvedSession, Session, SessionId};
pub use user::{AuthUser, Identity, UserMetadata};
