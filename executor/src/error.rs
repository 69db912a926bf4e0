use solana_client::client_error::ClientError;
use solana_sdk::{signature::Signature, transaction::TransactionError};
use thiserror::Error;

/// Failures that happen after a transaction was signed.
/// Both variants keep the signature so the transaction can be looked up on an explorer.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Simulation of {signature} failed: {reason}")]
    SimulationFailed {
        signature: Signature,
        reason: TransactionError,
        logs: Vec<String>,
    },
    #[error("Transaction {signature} was rejected: {source}")]
    Rejected {
        signature: Signature,
        #[source]
        source: ClientError,
    },
}

impl SubmitError {
    pub fn signature(&self) -> &Signature {
        match self {
            SubmitError::SimulationFailed { signature, .. } => signature,
            SubmitError::Rejected { signature, .. } => signature,
        }
    }
}

/// Recovers the signature of the failed transaction from an error chain, if any.
pub fn failed_signature(err: &anyhow::Error) -> Option<Signature> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SubmitError>())
        .map(|submit| *submit.signature())
}
