pub mod account;
pub mod binary;
pub mod error;
pub mod solution;
pub mod token;

pub use account::Account;
pub use binary::{BinaryFile, BinaryRegistry, FileStatus, RegisterMode, RegistryStatus, RequestedFile};
pub use error::DomainError;
pub use solution::{LifecycleState, RuntimeArgument, Solution, SolutionPatch, StateView};
pub use token::UploadToken;
