pub mod account;
pub mod auth;
pub mod error;

pub use account::{
    AmountRequest, ConfirmationResponse, UpdateEmailRequest, UpdatePasswordRequest, UserResponse,
    create_purchase, get_user, update_balance, update_email, update_password,
};
pub use auth::{
    LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RegisterRequest,
    RegisterResponse, TokenPairResponse, login, logout, refresh, register,
};
pub use error::{ApiError, ErrorResponse};
