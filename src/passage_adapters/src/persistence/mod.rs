pub mod hashmap_session_store;
pub mod hashmap_user_repository;
pub mod postgres_user_repository;
pub mod redis_session_store;

pub use hashmap_session_store::HashMapSessionStore;
pub use hashmap_user_repository::HashMapUserRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use redis_session_store::RedisSessionStore;
