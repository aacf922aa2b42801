pub mod bdl_client;

pub use bdl_client::{BdlClient, CallOutcome};
