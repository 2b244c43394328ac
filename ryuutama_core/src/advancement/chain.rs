//! AdvancementChain - the tree of choices resolved during one level-up
//!
//! Nodes live in a flat arena owned by the chain. A node only knows its
//! parent's id; children are found by scanning for that id.

use super::{create_advancement, Advancement, AdvancementKind, AdvancementRecord, AdvancementResult};
use crate::actor::{ActorDocument, Character};
use crate::config::{RulesConfig, MAX_LEVEL};
use crate::error::{RulesError, RulesResult};
use std::collections::BTreeMap;

/// Index of a node in its chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One advancement in the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancementNode {
    pub id: NodeId,
    pub kind: AdvancementKind,
    pub advancement: Advancement,
    pub parent: Option<NodeId>,
}

impl AdvancementNode {
    pub fn is_configured(&self, rules: &RulesConfig) -> bool {
        self.advancement.is_configured(rules)
    }
}

/// Lifecycle of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Initializing,
    Ready,
    Confirmed,
    Discarded,
}

pub struct AdvancementChain<'r> {
    rules: &'r RulesConfig,
    level: u8,
    state: ChainState,
    slots: Vec<Option<AdvancementNode>>,
    buckets: BTreeMap<AdvancementKind, Vec<NodeId>>,
    pending: Option<Vec<AdvancementResult>>,
}

impl<'r> AdvancementChain<'r> {
    /// Chain for reaching `level`
    pub fn new(rules: &'r RulesConfig, level: u8) -> RulesResult<Self> {
        if level == 0 || level > MAX_LEVEL {
            return Err(RulesError::invalid(format!(
                "target level {level} outside 1-{MAX_LEVEL}"
            )));
        }
        Ok(AdvancementChain {
            rules,
            level,
            state: ChainState::Initializing,
            slots: Vec::new(),
            buckets: BTreeMap::new(),
            pending: None,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Create one root per advancement the level grants, then their leaves
    pub fn initialize_roots(&mut self) -> RulesResult<()> {
        if self.state != ChainState::Initializing {
            return Err(RulesError::AlreadyInitialized);
        }

        for tag in self.rules.advancements_for_level(self.level) {
            let advancement = create_advancement(tag, self.level)?;
            let id = self.add_node(advancement, None);
            self.initialize_leaf_nodes(id)?;
        }

        self.state = ChainState::Ready;
        tracing::debug!(level = self.level, nodes = self.len(), "advancement chain ready");
        Ok(())
    }

    /// Insert a node without touching its leaves
    pub fn add_node(&mut self, advancement: Advancement, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        let kind = advancement.kind();
        self.slots.push(Some(AdvancementNode {
            id,
            kind,
            advancement,
            parent,
        }));
        self.buckets.entry(kind).or_default().push(id);
        id
    }

    /// Replace a node's children with what its current choice requires
    pub fn initialize_leaf_nodes(&mut self, id: NodeId) -> RulesResult<()> {
        let node = self
            .node(id)
            .ok_or_else(|| RulesError::invalid(format!("no advancement node {id:?}")))?;
        let children = node.advancement.children(self.rules);

        for child in self.children(id) {
            self.remove_node(child);
        }
        for child in children {
            let child_id = self.add_node(child, Some(id));
            self.initialize_leaf_nodes(child_id)?;
        }
        Ok(())
    }

    /// Change a node's choice and rebuild its leaves
    pub fn configure<F>(&mut self, id: NodeId, choose: F) -> RulesResult<()>
    where
        F: FnOnce(&mut Advancement),
    {
        let node = self
            .slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| RulesError::invalid(format!("no advancement node {id:?}")))?;
        let mut advancement = node.advancement.clone();
        choose(&mut advancement);
        if advancement.kind() != node.kind {
            return Err(RulesError::invalid("advancement type cannot change"));
        }
        node.advancement = advancement;
        self.initialize_leaf_nodes(id)
    }

    /// Remove a node and its descendants; false if it was not in its bucket
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(kind) = self.node(id).map(|n| n.kind) else {
            return false;
        };
        let Some(bucket) = self.buckets.get_mut(&kind) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|n| *n == id) else {
            return false;
        };
        bucket.remove(position);

        for child in self.children(id) {
            self.remove_node(child);
        }
        self.slots[id.0] = None;
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&AdvancementNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Direct children of a node, in insertion order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &AdvancementNode> {
        self.slots.iter().flatten()
    }

    pub fn nodes_of(&self, kind: AdvancementKind) -> Vec<&AdvancementNode> {
        self.buckets
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.node(*id)).collect())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes().filter(|n| n.parent.is_none()).map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every node in every bucket has a complete choice
    pub fn is_fully_configured(&self) -> bool {
        self.buckets
            .values()
            .flatten()
            .filter_map(|id| self.node(*id))
            .all(|n| n.is_configured(self.rules))
    }

    /// Collect each node's result in insertion order
    ///
    /// Each result sees the actor changes of the nodes before it, so two
    /// increases of the same ability or resource stack. Returns `None` and
    /// clears any earlier result while something is still unconfigured.
    pub fn submit(&mut self, character: &Character) -> RulesResult<Option<Vec<AdvancementResult>>> {
        self.pending = None;
        if self.state != ChainState::Ready || !self.is_fully_configured() {
            return Ok(None);
        }

        let mut working = character.clone();
        let mut results = Vec::new();
        for node in self.nodes() {
            let result = node.advancement.result(&working)?;
            if let AdvancementResult::Actor(changes) = &result {
                changes.apply_to(&mut working)?;
                working.prepare();
            }
            results.push(result);
        }

        self.pending = Some(results.clone());
        self.state = ChainState::Confirmed;
        tracing::debug!(level = self.level, results = results.len(), "advancement chain confirmed");
        Ok(Some(results))
    }

    /// Last successful submission
    pub fn pending(&self) -> Option<&[AdvancementResult]> {
        self.pending.as_deref()
    }

    /// Drop every decision
    pub fn discard(&mut self) {
        self.slots.clear();
        self.buckets.clear();
        self.pending = None;
        self.state = ChainState::Discarded;
        tracing::debug!(level = self.level, "advancement chain discarded");
    }
}

/// Apply submitted results: actor updates merge into one update, granted
/// advancements become records; the level is raised alongside
pub fn apply_results(
    document: &mut dyn ActorDocument,
    level: u8,
    results: Vec<AdvancementResult>,
) -> RulesResult<()> {
    let mut update = crate::actor::ActorUpdate::new();
    let mut records = Vec::new();
    for result in results {
        match result {
            AdvancementResult::Actor(changes) => update.merge(changes),
            AdvancementResult::Advancement(advancement) => {
                records.push(AdvancementRecord::generate(advancement))
            }
        }
    }
    update.set(crate::actor::paths::LEVEL, level);

    document.update(update)?;
    if !records.is_empty() {
        document.create_advancements(records)?;
    }
    Ok(())
}
