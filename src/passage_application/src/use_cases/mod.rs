pub mod create_purchase;
pub mod get_user;
pub mod login;
pub mod logout;
mod ownership;
pub mod register;
pub mod update_balance;
pub mod update_email;
pub mod update_password;

pub use create_purchase::CreatePurchaseUseCase;
pub use get_user::GetUserUseCase;
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use register::RegisterUseCase;
pub use update_balance::UpdateBalanceUseCase;
pub use update_email::UpdateEmailUseCase;
pub use update_password::UpdatePasswordUseCase;
