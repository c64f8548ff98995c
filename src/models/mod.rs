pub mod company;
pub mod project;
pub mod signature;
pub mod user;

pub use company::Company;
pub use project::Project;
pub use signature::{ProjectSignatures, Signature, SignatureOutcome, SignatureRecord, SigningRequest};
pub use user::User;
