//! Transaction queue - pending parameter changes keyed by content hash
use odra::prelude::*;
use odra::casper_types::bytesrepr::ToBytes;
use odra::casper_types::U256;
use super::errors::TimelockError;
use super::policy::PolicyId;
use super::sanity::SanityCheck;

/// Window after `eta` during which a transaction stays executable (14 days in ms)
pub const GRACE_PERIOD: u64 = 14 * 24 * 60 * 60 * 1000;

/// Pending call against a managed contract
#[odra::odra_type]
pub struct QueuedTransaction {
    /// False once executed or cancelled
    pub queued: bool,
    pub policy: PolicyId,
    pub initiator: Address,
    pub target: Address,
    /// Earliest execution time
    pub eta: u64,
    /// Entry point invoked on `target`
    pub signature: String,
    /// Serialized runtime args of the call
    pub data: Vec<u8>,
    /// Value the sanity probe returned at queue time
    pub sanity_check_value: U256,
    pub sanity_check: Option<SanityCheck>,
}

impl QueuedTransaction {
    /// eta <= now <= eta + GRACE_PERIOD
    pub fn is_executable_at(&self, now: u64) -> bool {
        self.eta <= now && now <= self.eta.saturating_add(GRACE_PERIOD)
    }
}

#[odra::module]
pub struct TransactionQueue {
    transactions: Mapping<[u8; 32], QueuedTransaction>,
}

#[odra::module]
impl TransactionQueue {
    pub fn get(&self, tx_hash: [u8; 32]) -> Option<QueuedTransaction> {
        self.transactions.get(&tx_hash)
    }

    /// Stores a new record, refusing to overwrite one that is still pending
    pub fn queue(&mut self, tx_hash: [u8; 32], transaction: QueuedTransaction) {
        if self.get(tx_hash).map(|tx| tx.queued).unwrap_or(false) {
            self.env().revert(TimelockError::TransactionAlreadyQueued);
        }
        self.transactions.set(&tx_hash, transaction);
    }

    /// Record that has been neither executed nor cancelled
    pub fn pending(&self, tx_hash: [u8; 32]) -> QueuedTransaction {
        match self.get(tx_hash) {
            Some(tx) if tx.queued => tx,
            _ => self.env().revert(TimelockError::TransactionNotQueued),
        }
    }

    pub fn consume(&mut self, tx_hash: [u8; 32]) {
        let mut tx = self.pending(tx_hash);
        tx.queued = false;
        self.transactions.set(&tx_hash, tx);
    }

    /// Content hash of (policy, initiator, target, signature, data)
    pub fn hash_of(
        &self,
        policy: PolicyId,
        initiator: Address,
        target: Address,
        signature: String,
        data: Vec<u8>,
    ) -> [u8; 32] {
        let mut preimage = Vec::new();
        let parts = [
            policy.to_bytes(),
            initiator.to_bytes(),
            target.to_bytes(),
            signature.to_bytes(),
            data.to_bytes(),
        ];
        for part in parts {
            match part {
                Ok(bytes) => preimage.extend_from_slice(&bytes),
                Err(_) => self.env().revert(TimelockError::EncodingFailed),
            }
        }
        self.env().hash(preimage)
    }
}
