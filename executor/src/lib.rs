pub mod error;      // Typed submission failures
pub mod rpc_ledger; // Standard RPC ledger adapter

pub use error::{failed_signature, SubmitError};
pub use rpc_ledger::RpcLedger;
