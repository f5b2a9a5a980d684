pub mod config;
pub mod fake_hash;
pub mod media;
pub mod repository;

pub use config::RegistrarConfig;
pub use fake_hash::{
    FakeHashes, OperationContext, Registrar, RegistrarError, Registration, RegistrationResult,
};
