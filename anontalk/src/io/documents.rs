//! Stored board documents: load with schema + invariant validation, save as
//! full rewrites.

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::CorruptPolicy;
use super::storage::KeyValueStore;
use crate::core::invariants::validate_threads;
use crate::core::membership::Membership;
use crate::model::Thread;

pub const JOINED_GROUPS_KEY: &str = "joinedGroups";
pub const THREADS_KEY: &str = "threads";

const GROUP_THREADS_PREFIX: &str = "threads-";

const THREADS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/board/threads.schema.json"
));
const JOINED_GROUPS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/board/joined_groups.schema.json"
));

/// Storage key holding the threads of one group in the per-group layout.
pub fn group_threads_key(group_id: &str) -> String {
    format!("{GROUP_THREADS_PREFIX}{group_id}")
}

/// Inverse of [`group_threads_key`].
pub fn parse_group_threads_key(key: &str) -> Option<&str> {
    key.strip_prefix(GROUP_THREADS_PREFIX)
}

/// Load the joined group set. A missing key is an empty set.
pub fn load_membership(store: &impl KeyValueStore, policy: CorruptPolicy) -> Result<Membership> {
    let Some(raw) = store.get(JOINED_GROUPS_KEY)? else {
        return Ok(Membership::default());
    };
    let parsed = parse_membership(&raw);
    let membership = recover(JOINED_GROUPS_KEY, parsed, policy)?;
    debug!(joined = membership.ids().len(), "membership loaded");
    Ok(membership)
}

pub fn write_membership(store: &mut impl KeyValueStore, membership: &Membership) -> Result<()> {
    let buf = serde_json::to_string(membership.ids()).context("serialize joined groups")?;
    store
        .set(JOINED_GROUPS_KEY, &buf)
        .with_context(|| format!("write {JOINED_GROUPS_KEY}"))
}

/// Load a thread document. A missing key is an empty collection.
///
/// `expected_group` is set for per-group documents, whose threads must all
/// carry that group id.
pub fn load_threads(
    store: &impl KeyValueStore,
    key: &str,
    expected_group: Option<&str>,
    policy: CorruptPolicy,
) -> Result<Vec<Thread>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let parsed = parse_threads(&raw, expected_group);
    let threads = recover(key, parsed, policy)?;
    debug!(key, threads = threads.len(), "threads loaded");
    Ok(threads)
}

/// Replace the thread document under `key`.
pub fn write_threads<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    threads: &[T],
) -> Result<()> {
    debug!(key, threads = threads.len(), "writing threads");
    let buf = serde_json::to_string(threads).context("serialize threads")?;
    store.set(key, &buf).with_context(|| format!("write {key}"))
}

fn parse_membership(raw: &str) -> Result<Membership> {
    let value: Value = serde_json::from_str(raw).context("parse json")?;
    validate_schema(JOINED_GROUPS_SCHEMA, &value)?;
    let ids: Vec<String> = serde_json::from_value(value).context("deserialize joined groups")?;
    Ok(Membership::from_ids(ids))
}

fn parse_threads(raw: &str, expected_group: Option<&str>) -> Result<Vec<Thread>> {
    let value: Value = serde_json::from_str(raw).context("parse json")?;
    validate_schema(THREADS_SCHEMA, &value)?;
    let threads: Vec<Thread> = serde_json::from_value(value).context("deserialize threads")?;
    let errors = validate_threads(&threads, expected_group);
    if !errors.is_empty() {
        return Err(anyhow!("thread invariants failed: {}", errors.join("; ")));
    }
    Ok(threads)
}

fn validate_schema(schema_raw: &str, instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(schema_raw).context("parse embedded schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(instance) {
        let messages = compiled
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!("schema validation failed: {}", messages.join("; ")));
    }
    Ok(())
}

/// Apply `policy` to a document that failed to parse or validate.
fn recover<T: Default>(key: &str, parsed: Result<T>, policy: CorruptPolicy) -> Result<T> {
    match (parsed, policy) {
        (Ok(value), _) => Ok(value),
        (Err(err), CorruptPolicy::Reset) => {
            warn!(key, error = %format!("{err:#}"), "discarding malformed stored document");
            Ok(T::default())
        }
        (Err(err), CorruptPolicy::Fail) => Err(err.context(format!("load {key}"))),
    }
}
