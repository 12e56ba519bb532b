//! Building trees from flat parent/child records.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::tree::{NodeId, Tree};

/// A flat record that names itself and, unless it is the root, its parent.
pub trait TreeRecord {
    fn id(&self) -> &str;

    /// `None` or an empty string marks the root.
    fn parent_id(&self) -> Option<&str>;
}

/// Record format read by the command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NodeRecord {
    pub fn new(id: &str, parent_id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: Some(parent_id.to_string()),
            name: Some(name.to_string()),
        }
    }
}

impl TreeRecord for NodeRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

/// Shows the record's name, or its id when the name is missing or empty.
impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id);
        f.write_str(label)
    }
}

fn normalized_parent<R: TreeRecord>(record: &R) -> Option<&str> {
    record.parent_id().filter(|parent| !parent.is_empty())
}

/// Groups `records` by parent id and assembles the tree.
///
/// Children of a node keep the relative order their records had in the input.
pub fn build_tree<R: TreeRecord>(records: Vec<R>) -> Result<Tree<R>, BuildError> {
    if records.is_empty() {
        return Err(BuildError::Empty);
    }

    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut root = None;
    for (index, record) in records.iter().enumerate() {
        if index_by_id.insert(record.id(), index).is_some() {
            return Err(BuildError::DuplicateId(record.id().to_string()));
        }
        if normalized_parent(record).is_none() {
            if let Some(first) = root {
                let first: &R = &records[first];
                return Err(BuildError::MultipleRoots {
                    first: first.id().to_string(),
                    second: record.id().to_string(),
                });
            }
            root = Some(index);
        }
    }
    let root = root.ok_or(BuildError::NoRoot)?;

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (index, record) in records.iter().enumerate() {
        let Some(parent) = normalized_parent(record) else {
            continue;
        };
        let Some(&parent_index) = index_by_id.get(parent) else {
            return Err(BuildError::UnknownParent {
                id: record.id().to_string(),
                parent: parent.to_string(),
            });
        };
        children_of[parent_index].push(index);
    }
    drop(index_by_id);

    let mut slots: Vec<Option<R>> = records.into_iter().map(Some).collect();
    let Some(root_record) = slots[root].take() else {
        return Err(BuildError::NoRoot);
    };
    let mut tree = Tree::new(root_record);

    let mut pending: Vec<(usize, NodeId)> = vec![(root, tree.root())];
    while let Some((index, node)) = pending.pop() {
        for &child in &children_of[index] {
            // each record has exactly one parent, so it is taken at most once
            if let Some(record) = slots[child].take() {
                let id = tree.create_node(record, node);
                pending.push((child, id));
            }
        }
    }

    let unreachable: Vec<String> = slots
        .into_iter()
        .flatten()
        .map(|record| record.id().to_string())
        .collect();
    if !unreachable.is_empty() {
        return Err(BuildError::Unreachable { ids: unreachable });
    }

    tracing::debug!(nodes = tree.len(), "built tree from records");
    Ok(tree)
}

/// Deserializes a JSON array of [`NodeRecord`]s.
pub fn parse_records(json: &str) -> serde_json::Result<Vec<NodeRecord>> {
    serde_json::from_str(json)
}

/// A 35-node organisation-chart style tree with uneven subtree widths.
///
/// Every record except the root is named after its parent, so a rendered box
/// shows the id of the box above it.
pub fn sample_records() -> Vec<NodeRecord> {
    const RECORDS: [(&str, &str, &str); 35] = [
        ("TO", "", "Test GP O"),
        ("JW", "TO", "TO"),
        ("BK", "JW", "JW"),
        ("WH", "BK", "BK"),
        ("SE", "BK", "BK"),
        ("QI", "BK", "BK"),
        ("KX", "BK", "BK"),
        ("KA", "KX", "KX"),
        ("HH", "JW", "JW"),
        ("DN", "HH", "HH"),
        ("KT", "HH", "HH"),
        ("JB", "KT", "KT"),
        ("UM", "KT", "KT"),
        ("AL", "KT", "KT"),
        ("FR", "KT", "KT"),
        ("WE", "HH", "HH"),
        ("CO", "WE", "WE"),
        ("LE", "WE", "WE"),
        ("LO", "WE", "WE"),
        ("YI", "HH", "HH"),
        ("EI", "YI", "YI"),
        ("DJ", "YI", "YI"),
        ("SH", "YI", "YI"),
        ("BS", "JW", "JW"),
        ("SP", "BS", "BS"),
        ("SB", "JW", "JW"),
        ("GQ", "SB", "SB"),
        ("JS", "GQ", "GQ"),
        ("HT", "SB", "SB"),
        ("MB", "HT", "HT"),
        ("MF", "HT", "HT"),
        ("FW", "SB", "SB"),
        ("GM", "FW", "FW"),
        ("XT", "FW", "FW"),
        ("VQ", "FW", "FW"),
    ];
    RECORDS
        .iter()
        .map(|(id, parent, name)| NodeRecord::new(id, parent, name))
        .collect()
}
