pub mod callback_event;
pub mod route;

pub use callback_event::{CallbackEvent, CallbackFailure, CallbackParams};
pub use route::{paths, Route};
