pub mod config;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod token;

pub use hashing::Argon2Hasher;
pub use persistence::{
    HashMapSessionStore, HashMapUserRepository, PostgresUserRepository, RedisSessionStore,
};
pub use token::JwtCodec;
