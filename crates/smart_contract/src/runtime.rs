//! Contract runtime: the host functions a running contract calls into.

use crate::context::ExecutionContext;
use crate::storage::StateStore;
use crate::{Error, Result};
use guest_config::{MarshalConfig, StorageConfig};
use guest_json::{DecodeMode, JsonCodec};
use guest_vm::{DynamicValue, ValueStack};

/// Host state for one contract call.
///
/// Owns the backing store for the duration of the call; use
/// [`ContractRuntime::into_store`] to take it back afterwards.
#[derive(Debug)]
pub struct ContractRuntime<S> {
    context: ExecutionContext,
    store: S,
    codec: JsonCodec,
    storage: StorageConfig,
}

impl<S: StateStore> ContractRuntime<S> {
    /// Creates a runtime with default limits and storage layout.
    pub fn new(context: ExecutionContext, store: S) -> Self {
        Self::with_config(context, store, &MarshalConfig::default())
    }

    pub fn with_config(context: ExecutionContext, store: S, config: &MarshalConfig) -> Self {
        let codec = JsonCodec::new(config.json);
        log::debug!(
            "[{}] runtime ready, json limits {}",
            context.contract_id,
            codec.limits()
        );
        Self {
            context,
            store,
            codec,
            storage: config.storage.clone(),
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    pub(crate) fn storage_config(&self) -> &StorageConfig {
        &self.storage
    }

    pub(crate) fn ensure_writable(&self) -> Result<()> {
        if self.context.is_query {
            log::warn!(
                "[{}] state write rejected in query call",
                self.context.contract_id
            );
            return Err(Error::ReadOnly);
        }
        Ok(())
    }

    /// Logs `values` as one JSON-form line tagged with the contract id and
    /// returns the text.
    pub fn print(&self, values: &[DynamicValue]) -> Result<String> {
        let text = self.codec.encode_range(values, true)?;
        let message = String::from_utf8_lossy(&text).into_owned();
        log::info!("[{}] Contract Log: {}", self.context.contract_id, message);
        Ok(message)
    }

    /// Prints every value currently on `stack`.
    pub fn print_stack(&self, stack: &ValueStack) -> Result<String> {
        self.print(stack.as_slice())
    }

    /// JSON text for `value`, as handed back to contract code.
    pub fn json_encode(&self, value: &DynamicValue) -> Result<Vec<u8>> {
        Ok(self.codec.encode_one(value, true)?)
    }

    /// Parses strict JSON text supplied by contract code.
    pub fn json_decode(&self, text: &[u8]) -> Result<DynamicValue> {
        self.codec
            .decode(text, DecodeMode::STRICT)
            .map_err(Error::Json)
    }

    pub fn sender(&self) -> DynamicValue {
        self.context.sender_value()
    }

    pub fn origin(&self) -> DynamicValue {
        self.context.origin_value()
    }

    pub fn tx_hash(&self) -> DynamicValue {
        self.context.tx_hash_value()
    }

    pub fn block_height(&self) -> DynamicValue {
        self.context.block_height_value()
    }

    pub fn timestamp(&self) -> DynamicValue {
        self.context.timestamp_value()
    }

    pub fn contract_id(&self) -> DynamicValue {
        self.context.contract_id_value()
    }

    pub fn amount(&self) -> DynamicValue {
        self.context.amount_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use guest_json::EncodeError;
    use guest_vm::Composite;

    fn runtime() -> ContractRuntime<MemoryStore> {
        ContractRuntime::new(ExecutionContext::new("test-contract"), MemoryStore::new())
    }

    #[test]
    fn test_print_formats_arguments() {
        let runtime = runtime();
        let list = Composite::from_sequence(vec![1, 2]);
        let message = runtime
            .print(&[DynamicValue::from("sum"), list.into(), DynamicValue::Nil])
            .unwrap();
        assert_eq!(message, r#"["sum",[1,2],{}]"#);

        assert_eq!(runtime.print(&[DynamicValue::from(5)]).unwrap(), "5");
        assert_eq!(runtime.print(&[]).unwrap(), "");
    }

    #[test]
    fn test_print_stack() {
        let stack = ValueStack::from_values(vec![DynamicValue::from(true), DynamicValue::from("x")]);
        assert_eq!(runtime().print_stack(&stack).unwrap(), r#"[true,"x"]"#);
    }

    #[test]
    fn test_print_rejects_cycles() {
        let node = Composite::new();
        node.set("self", node.clone()).unwrap();
        let err = runtime().print(&[node.into()]).unwrap_err();
        assert!(matches!(err, Error::Encode(EncodeError::CyclicStructure)));
    }

    #[test]
    fn test_with_config_applies_limits() {
        let mut config = MarshalConfig::default();
        config.json.max_depth = 3;
        let runtime =
            ContractRuntime::with_config(ExecutionContext::new("cfg"), MemoryStore::new(), &config);
        assert_eq!(runtime.codec().limits().max_depth, 3);
    }

    #[test]
    fn test_json_helpers() {
        let runtime = runtime();
        let value = runtime.json_decode(br#"{"a":[1,2]}"#).unwrap();
        assert_eq!(runtime.json_encode(&value).unwrap(), br#"{"a":[1,2]}"#);

        let err = runtime.json_decode(b"{a:1}").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("not proper json format"));
    }
}
