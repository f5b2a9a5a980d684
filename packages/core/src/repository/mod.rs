mod error;
mod traits;

pub mod memory;

pub use error::RepositoryError;
pub use memory::InMemoryRepository;
pub use traits::MediaRepository;
