mod account;
mod auth;
mod helpers;
