pub mod amount;
pub mod email;
pub mod login_input;
pub mod password;
pub mod token;
pub mod user;
pub mod username;
