pub mod request;
pub mod response;

pub use request::{
    CallbackResolveRequest, EmailCheckQuery, IdentityRequest, LoginRequest,
    PasswordUpdateRequest, SignUpRequest,
};
pub use response::{CurrentUserResponse, RedirectResponse, SignUpResponse};
