//! Per-call execution context exposed to contract code.

use guest_vm::DynamicValue;
use serde::{Deserialize, Serialize};

/// Facts about the transaction or query a contract is running in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionContext {
    /// Identifier of the executing contract.
    pub contract_id: String,
    /// Account that called the contract.
    pub sender: String,
    /// Account that signed the outermost transaction.
    pub origin: String,
    /// Hash of the enclosing transaction, empty for queries.
    pub tx_hash: String,
    pub block_height: u64,
    /// Block time in seconds since the Unix epoch.
    pub timestamp: i64,
    /// Amount transferred with the call, as a decimal string.
    pub amount: String,
    /// Query calls may read state but never write it.
    pub is_query: bool,
}

impl ExecutionContext {
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            ..Self::default()
        }
    }

    /// Same context, marked as a read-only query.
    pub fn into_query(mut self) -> Self {
        self.is_query = true;
        self
    }

    pub fn sender_value(&self) -> DynamicValue {
        DynamicValue::from(self.sender.as_str())
    }

    pub fn origin_value(&self) -> DynamicValue {
        DynamicValue::from(self.origin.as_str())
    }

    pub fn tx_hash_value(&self) -> DynamicValue {
        DynamicValue::from(self.tx_hash.as_str())
    }

    pub fn contract_id_value(&self) -> DynamicValue {
        DynamicValue::from(self.contract_id.as_str())
    }

    pub fn amount_value(&self) -> DynamicValue {
        DynamicValue::from(self.amount.as_str())
    }

    pub fn timestamp_value(&self) -> DynamicValue {
        DynamicValue::from(self.timestamp)
    }

    /// Heights past `i64::MAX` fall back to a float.
    pub fn block_height_value(&self) -> DynamicValue {
        match i64::try_from(self.block_height) {
            Ok(height) => DynamicValue::from(height),
            Err(_) => DynamicValue::from(self.block_height as f64),
        }
    }
}
