use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_dynamo::Error),

    #[error("{0}")]
    Request(String),
}

/// Key-value persistence seam. One table per record kind, items are flat
/// JSON documents keyed by a caller-assigned string primary key.
///
/// Handlers only ever issue a single call per request through this trait.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one item by primary key. Absent keys are `Ok(None)`, not errors.
    async fn get(&self, table: &str, key: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Unconditional upsert: an existing item with the same key is replaced.
    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError>;

    /// Set a single named attribute on the item, returning only the updated
    /// attributes (never the full record).
    async fn update_attribute(
        &self,
        table: &str,
        key: &str,
        id: &str,
        attr: &str,
        value: Value,
    ) -> Result<Value, StoreError>;

    /// Every item in the table, single page, no ordering guarantee.
    async fn scan(&self, table: &str) -> Result<Vec<Value>, StoreError>;

    /// Items whose top-level `attr` equals `value`, served by a secondary
    /// index rather than a filtered scan.
    async fn query_by_attribute(
        &self,
        table: &str,
        index: &str,
        attr: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError>;
}

/// DynamoDB-backed store.
pub struct DynamoStore {
    client: DynamoClient,
}

impl DynamoStore {
    pub fn new(client: DynamoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn get(&self, table: &str, key: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(key, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        match result.item() {
            Some(item) => Ok(Some(serde_dynamo::from_item(item.clone())?)),
            None => Ok(None),
        }
    }

    async fn put(&self, table: &str, _key: &str, item: Value) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(item)?;
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Ok(())
    }

    async fn update_attribute(
        &self,
        table: &str,
        key: &str,
        id: &str,
        attr: &str,
        value: Value,
    ) -> Result<Value, StoreError> {
        let result = self
            .client
            .update_item()
            .table_name(table)
            .key(key, AttributeValue::S(id.to_string()))
            .update_expression("SET #attr = :value")
            .expression_attribute_names("#attr", attr)
            .expression_attribute_values(":value", serde_dynamo::to_attribute_value(value)?)
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let attrs = result.attributes().cloned().unwrap_or_default();
        Ok(serde_dynamo::from_item(attrs)?)
    }

    async fn scan(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(table)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        result
            .items()
            .iter()
            .map(|item| serde_dynamo::from_item(item.clone()).map_err(StoreError::from))
            .collect()
    }

    async fn query_by_attribute(
        &self,
        table: &str,
        index: &str,
        attr: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(table)
            .index_name(index)
            .key_condition_expression("#attr = :value")
            .expression_attribute_names("#attr", attr)
            .expression_attribute_values(":value", AttributeValue::S(value.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        result
            .items()
            .iter()
            .map(|item| serde_dynamo::from_item(item.clone()).map_err(StoreError::from))
            .collect()
    }
}

/// In-memory store with the same upsert/merge semantics as DynamoDB.
/// Used by the handler tests; never deployed.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, table: &str, _key: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.get(table).and_then(|t| t.get(id)).cloned())
    }

    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError> {
        let id = item
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Request(format!("item is missing key attribute {key}")))?
            .to_string();
        let mut tables = self.tables.lock().unwrap();
        tables.entry(table.to_string()).or_default().insert(id, item);
        Ok(())
    }

    async fn update_attribute(
        &self,
        table: &str,
        key: &str,
        id: &str,
        attr: &str,
        value: Value,
    ) -> Result<Value, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let item = tables
            .entry(table.to_string())
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| {
                let mut fresh = serde_json::Map::new();
                fresh.insert(key.to_string(), Value::String(id.to_string()));
                Value::Object(fresh)
            });
        item[attr] = value.clone();
        // UPDATED_NEW: only the attributes touched by the expression.
        Ok(json!({ attr: value }))
    }

    async fn scan(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query_by_attribute(
        &self,
        table: &str,
        _index: &str,
        attr: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|t| {
                t.values()
                    .filter(|item| item.get(attr).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
