pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use error::ReadingError;
pub use memory::MemoryReadingRepository;
pub use postgres::PgReadingRepository;
pub use repository::ReadingRepository;
pub use store::ReadingStore;
