//! Raw configuration documents
//!
//! A parsed YAML document kept as a tree so that presence checks
//! (`oauth.provider`) and keyed decodes (`vouch`, `lasso`) can run against the
//! same bytes. Mapping keys are folded to lower case on load, which makes key
//! lookup case-insensitive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::config::error::{ConfigError, Result};

/// A parsed YAML document
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    path: PathBuf,
    root: Value,
}

impl RawDocument {
    /// Read and parse the document at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading configuration document {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Read(path.to_path_buf(), e.to_string()),
        })?;

        Self::parse(path, &contents)
    }

    /// Parse `contents`, recording `path` for error messages
    pub fn parse<P: AsRef<Path>>(path: P, contents: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let value: Value = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::Parse(path.clone(), e.to_string()))?;

        let root = match fold_keys(value) {
            // an empty document is an empty mapping
            Value::Null => Value::Mapping(Mapping::new()),
            mapping @ Value::Mapping(_) => mapping,
            other => {
                return Err(ConfigError::Parse(
                    path,
                    format!("expected a mapping at the top level, found {}", kind(&other)),
                ))
            }
        };

        Ok(Self { path, root })
    }

    /// Where the document was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level keys in document order
    pub fn top_level_keys(&self) -> Vec<String> {
        match &self.root {
            Value::Mapping(map) => map.keys().map(key_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a dotted key path such as `vouch.cookie.name`
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Mapping(map) => map.get(segment.to_lowercase().as_str()),
            _ => None,
        })
    }

    /// Whether `key` is present with a non-null value
    pub fn is_set(&self, key: &str) -> bool {
        !matches!(self.lookup(key), None | Some(Value::Null))
    }

    /// Scalar value at `key` as a string, empty when absent or not a scalar
    pub fn get(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Decode the subtree at `key`. An absent or null subtree decodes to the
    /// zero value.
    pub fn unmarshal_key<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.lookup(key) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => serde_yaml::from_value(value.clone())
                .map_err(|e| ConfigError::Decode(key.to_string(), e.to_string())),
        }
    }

    /// Decode the subtree at `key`, leaving out every value that does not fit
    /// `T`. Returns the decoded value and the dotted paths that were left out.
    pub fn unmarshal_key_lossy<T>(&self, key: &str) -> (T, Vec<String>)
    where
        T: DeserializeOwned + Default,
    {
        let value = match self.lookup(key) {
            None | Some(Value::Null) => return (T::default(), Vec::new()),
            Some(value) => value,
        };

        if let Ok(decoded) = serde_yaml::from_value(value.clone()) {
            return (decoded, Vec::new());
        }

        let mut leaves = Vec::new();
        collect_leaves(value, &mut Vec::new(), &mut leaves);

        let mut pruned = value.clone();
        let mut dropped = Vec::new();
        for (path, leaf) in leaves {
            // fields decode independently, so each leaf can be tried on its own
            if serde_yaml::from_value::<T>(nest(&path, leaf)).is_err() {
                remove_path(&mut pruned, &path);
                dropped.push(dotted(key, &path));
            }
        }

        match serde_yaml::from_value(pruned) {
            Ok(decoded) => (decoded, dropped),
            Err(_) => (T::default(), vec![key.to_string()]),
        }
    }
}

/// Every scalar, sequence and empty mapping under `value`, with its key path
fn collect_leaves(value: &Value, path: &mut Vec<Value>, leaves: &mut Vec<(Vec<Value>, Value)>) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                path.push(key.clone());
                collect_leaves(child, path, leaves);
                path.pop();
            }
        }
        other => leaves.push((path.clone(), other.clone())),
    }
}

/// Wrap `leaf` in one mapping per path segment
fn nest(path: &[Value], leaf: Value) -> Value {
    path.iter().rev().fold(leaf, |inner, key| {
        let mut map = Mapping::new();
        map.insert(key.clone(), inner);
        Value::Mapping(map)
    })
}

/// Remove the value at `path`, along with any mapping left empty by it
fn remove_path(node: &mut Value, path: &[Value]) {
    let (Some((first, rest)), Value::Mapping(map)) = (path.split_first(), node) else {
        return;
    };

    if rest.is_empty() {
        map.remove(first);
        return;
    }

    if let Some(child) = map.get_mut(first) {
        remove_path(child, rest);
        if matches!(child, Value::Mapping(m) if m.is_empty()) {
            map.remove(first);
        }
    }
}

fn dotted(key: &str, path: &[Value]) -> String {
    path.iter()
        .map(key_to_string)
        .fold(key.to_string(), |acc, segment| format!("{}.{}", acc, segment))
}

/// Recursively lower-case string mapping keys. When two keys fold to the same
/// name the later one wins.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut folded = Mapping::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                folded.insert(key, fold_keys(value));
            }
            Value::Mapping(folded)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(fold_keys).collect()),
        Value::Tagged(tagged) => fold_keys(tagged.value),
        other => other,
    }
}

pub(crate) fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
