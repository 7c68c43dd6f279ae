mod repository;
mod redis_service;
mod memory;

pub use repository::Repository;
pub use redis_service::RedisRepository;
pub use memory::MemoryRepository;
