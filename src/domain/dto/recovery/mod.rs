pub mod request;
pub mod response;

pub use request::{FindIdRequest, FindPasswordRequest};
pub use response::{EmailCheckResponse, FindIdResponse, SentResponse};
