//! One in-memory table: its schema and items keyed by encoded primary key.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use dynamap_core::mapper::{encode_key, key_of};
use dynamap_core::{
    AttributeAction, AttributeValue, AttributeValueUpdate, ComparisonOperator, Condition,
    DynamapError, ExpectedAttributeValue, Item, Key, KeyConditions, ProvisionedThroughput,
    QueryOptions, QueryResult, Result, ReturnValues, TableDescription, TableSchema, TableStatus,
};

use super::condition::{check_expected, compare, matches, validate};

#[derive(Debug, Clone)]
pub struct MemoryTable {
    schema: TableSchema,
    created_at: f64,
    items: BTreeMap<String, Item>,
}

impl MemoryTable {
    pub fn new(schema: TableSchema, created_at: f64) -> Self {
        Self {
            schema,
            created_at,
            items: BTreeMap::new(),
        }
    }

    pub fn describe(&self, status: TableStatus) -> TableDescription {
        let mut description = self.schema.describe(status);
        description.creation_date_time = Some(self.created_at);
        description.item_count = Some(self.items.len() as u64);
        description.table_size_bytes = Some(
            self.items
                .values()
                .flat_map(|item| item.iter())
                .map(|(name, value)| (name.len() + value.size()) as u64)
                .sum(),
        );
        description
    }

    pub fn set_throughput(&mut self, throughput: ProvisionedThroughput) {
        self.schema.provisioned_throughput = throughput;
    }

    /// Stores an item and returns the one it replaced.
    pub fn put(
        &mut self,
        item: Item,
        expected: &HashMap<String, ExpectedAttributeValue>,
    ) -> Result<Option<Item>> {
        let key = key_of(&self.schema.key_schema, &item)?;
        let id = encode_key(&self.schema, &key)?;
        check_expected(self.items.get(&id), expected)?;
        Ok(self.items.insert(id, item))
    }

    /// Checks that `item` carries a well-typed primary key.
    pub fn validate_item(&self, item: &Item) -> Result<()> {
        let key = key_of(&self.schema.key_schema, item)?;
        self.validate_key(&key)
    }

    /// Checks that `key` matches the key schema.
    pub fn validate_key(&self, key: &Key) -> Result<()> {
        encode_key(&self.schema, key).map(|_| ())
    }

    pub fn get(&self, key: &Key) -> Result<Option<&Item>> {
        let id = encode_key(&self.schema, key)?;
        Ok(self.items.get(&id))
    }

    /// Removes an item and returns it.
    pub fn delete(
        &mut self,
        key: &Key,
        expected: &HashMap<String, ExpectedAttributeValue>,
    ) -> Result<Option<Item>> {
        let id = encode_key(&self.schema, key)?;
        check_expected(self.items.get(&id), expected)?;
        Ok(self.items.remove(&id))
    }

    /// Applies attribute updates, creating the item if it is absent.
    pub fn update(
        &mut self,
        key: &Key,
        updates: &HashMap<String, AttributeValueUpdate>,
        expected: &HashMap<String, ExpectedAttributeValue>,
        return_values: Option<ReturnValues>,
    ) -> Result<Option<Item>> {
        let id = encode_key(&self.schema, key)?;
        let old = self.items.get(&id).cloned();
        check_expected(old.as_ref(), expected)?;

        if let Some(name) = updates
            .keys()
            .find(|name| self.schema.key_schema.iter().any(|k| &k.attribute_name == *name))
        {
            return Err(DynamapError::validation(format!(
                "Cannot update attribute {name}. This attribute is part of the key"
            )));
        }

        let only_deletes = updates
            .values()
            .all(|update| update.action == AttributeAction::Delete);
        if old.is_none() && only_deletes {
            return Ok(None);
        }

        let mut new = old.clone().unwrap_or_else(|| key.clone());
        for (name, update) in updates {
            apply_update(&mut new, name, update)?;
        }
        self.items.insert(id, new.clone());

        let updated = |item: &Item| -> Item {
            item.iter()
                .filter(|(name, _)| updates.contains_key(*name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        };
        Ok(match return_values {
            None | Some(ReturnValues::None) => None,
            Some(ReturnValues::AllOld) => old,
            Some(ReturnValues::UpdatedOld) => old.as_ref().map(updated),
            Some(ReturnValues::AllNew) => Some(new),
            Some(ReturnValues::UpdatedNew) => Some(updated(&new)),
        })
    }

    /// Every item in storage order.
    pub fn scan(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        if options.index_name.is_some() {
            return Err(DynamapError::validation(
                "Secondary indexes are not supported by the in-memory backend",
            ));
        }

        let (hash, range) = self.split_conditions(&options.key_conditions)?;
        let range_name = self.schema.range_key().map(|k| k.attribute_name.as_str());

        let mut found: Vec<&Item> = self
            .items
            .values()
            .filter(|item| hash.matches_item(item))
            .filter(|item| range.as_ref().is_none_or(|range| range.matches_item(item)))
            .collect();

        if let Some(range_name) = range_name {
            found.sort_by(|left, right| match (left.get(range_name), right.get(range_name)) {
                (Some(left), Some(right)) => compare(left, right).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            });
        }
        if options.scan_index_forward == Some(false) {
            found.reverse();
        }

        if let Some(start) = &options.exclusive_start_key {
            let start = encode_key(&self.schema, start)?;
            let position = found.iter().position(|item| {
                key_of(&self.schema.key_schema, item)
                    .and_then(|key| encode_key(&self.schema, &key))
                    .is_ok_and(|id| id == start)
            });
            if let Some(position) = position {
                found.drain(..=position);
            }
        }

        let mut last_evaluated_key = None;
        if let Some(limit) = options.limit {
            let limit = limit as usize;
            if found.len() > limit {
                found.truncate(limit);
                if let Some(last) = found.last() {
                    last_evaluated_key = Some(key_of(&self.schema.key_schema, last)?);
                }
            }
        }

        let items: Vec<Item> = found
            .into_iter()
            .map(|item| project(item, &options.attributes_to_get))
            .collect();
        Ok(QueryResult {
            count: items.len(),
            items,
            last_evaluated_key,
            consumed_capacity: None,
        })
    }

    fn split_conditions<'a>(
        &self,
        conditions: &'a KeyConditions,
    ) -> Result<(KeyCondition<'a>, Option<KeyCondition<'a>>)> {
        let hash_name = self
            .schema
            .hash_key()
            .map(|k| k.attribute_name.as_str())
            .unwrap_or_default();
        let range_name = self.schema.range_key().map(|k| k.attribute_name.as_str());

        let mut hash = None;
        let mut range = None;
        for (name, condition) in conditions {
            validate(name, condition)?;
            if name == hash_name {
                if condition.comparison_operator != ComparisonOperator::Eq {
                    return Err(DynamapError::validation(
                        "Query key condition not supported: hash key requires EQ",
                    ));
                }
                hash = Some(KeyCondition { name, condition });
            } else if Some(name.as_str()) == range_name {
                if condition.comparison_operator == ComparisonOperator::Ne {
                    return Err(DynamapError::validation(
                        "Query key condition not supported: NE on range key",
                    ));
                }
                range = Some(KeyCondition { name, condition });
            } else {
                return Err(DynamapError::validation(format!(
                    "Query condition on non-key attribute {name}"
                )));
            }
        }

        let hash = hash.ok_or_else(|| {
            DynamapError::validation("Query condition missed key schema element")
        })?;
        Ok((hash, range))
    }
}

struct KeyCondition<'a> {
    name: &'a str,
    condition: &'a Condition,
}

impl KeyCondition<'_> {
    fn matches_item(&self, item: &Item) -> bool {
        item.get(self.name)
            .is_some_and(|value| matches(value, self.condition))
    }
}

fn apply_update(item: &mut Item, name: &str, update: &AttributeValueUpdate) -> Result<()> {
    match (update.action, &update.value) {
        (AttributeAction::Put, Some(value)) => {
            item.insert(name.to_string(), value.clone());
        }
        (AttributeAction::Delete, None) => {
            item.remove(name);
        }
        (AttributeAction::Add, Some(AttributeValue::N(delta))) => {
            let sum = match item.get(name) {
                None => delta.clone(),
                Some(AttributeValue::N(current)) => add_numbers(current, delta)?,
                Some(AttributeValue::S(_)) => {
                    return Err(DynamapError::validation(format!(
                        "An operand in the update expression has an incorrect data type: {name}"
                    )));
                }
            };
            item.insert(name.to_string(), AttributeValue::N(sum));
        }
        (AttributeAction::Add, Some(AttributeValue::S(_))) => {
            return Err(DynamapError::validation(format!(
                "ADD is only supported on numbers: {name}"
            )));
        }
        (AttributeAction::Delete, Some(_)) => {
            return Err(DynamapError::validation(format!(
                "DELETE with a value is only supported on sets: {name}"
            )));
        }
        (AttributeAction::Put | AttributeAction::Add, None) => {
            return Err(DynamapError::validation(format!(
                "Action {:?} on {name} requires a value",
                update.action
            )));
        }
    }
    Ok(())
}

fn add_numbers(left: &str, right: &str) -> Result<String> {
    if let (Ok(left), Ok(right)) = (left.parse::<i128>(), right.parse::<i128>()) {
        return left
            .checked_add(right)
            .map(|sum| sum.to_string())
            .ok_or_else(|| DynamapError::validation("Number overflow in ADD"));
    }
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(left), Ok(right)) => Ok((left + right).to_string()),
        _ => Err(DynamapError::validation(format!(
            "Cannot add non-numeric values {left} and {right}"
        ))),
    }
}

/// Keeps only the named attributes. An empty list keeps everything.
pub fn project(item: &Item, attributes: &[String]) -> Item {
    if attributes.is_empty() {
        return item.clone();
    }
    item.iter()
        .filter(|(name, _)| attributes.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
