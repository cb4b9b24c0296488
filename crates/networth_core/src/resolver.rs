//! Chain resolution for derived cash flows
//!
//! Cash flows linked to another income or expense item are resolved once,
//! before the year loop starts. Resolution is a depth-first walk over the
//! linkage graph: every item ends up either `Resolved(value)` or
//! `Unresolved`, and every unresolved item is reported as a [`LinkageIssue`].
//!
//! Items linked to an asset or liability are not resolved here. Their value
//! follows a balance that moves every year, so the simulator derives it inside
//! the loop. A chain that runs into such an item cannot be resolved up front.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::LinkageIssue;
use crate::model::{CashFlowItem, ItemId, ItemKind, LinkCadence};

/// Resolution state of a single cash-flow item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Unresolved,
    Resolved(f64),
}

impl Resolution {
    /// Unresolved items contribute nothing to the projection
    #[must_use]
    pub fn value_or_zero(self) -> f64 {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::Unresolved => 0.0,
        }
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Outcome of resolving all income/expense chains
#[derive(Debug, Clone, Default)]
pub struct ChainResolution {
    values: FxHashMap<ItemId, Resolution>,
    pub issues: Vec<LinkageIssue>,
}

impl ChainResolution {
    /// Resolution of an item; items never visited are unresolved
    #[must_use]
    pub fn resolution(&self, id: ItemId) -> Resolution {
        self.values
            .get(&id)
            .copied()
            .unwrap_or(Resolution::Unresolved)
    }

    /// Yearly value to use for an item, zero when unresolved
    #[must_use]
    pub fn yearly_value(&self, id: ItemId) -> f64 {
        self.resolution(id).value_or_zero()
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Visiting,
    Done(Resolution),
}

struct Resolver<'a> {
    items: FxHashMap<ItemId, &'a CashFlowItem>,
    marks: FxHashMap<ItemId, Mark>,
    stack: Vec<ItemId>,
    in_cycle: FxHashSet<ItemId>,
    issues: Vec<LinkageIssue>,
}

impl<'a> Resolver<'a> {
    fn new(items: &'a [CashFlowItem]) -> Self {
        let mut index = FxHashMap::default();
        for item in items {
            index.entry(item.id).or_insert(item);
        }
        Self {
            items: index,
            marks: FxHashMap::default(),
            stack: Vec::new(),
            in_cycle: FxHashSet::default(),
            issues: Vec::new(),
        }
    }

    fn visit(&mut self, id: ItemId) -> Resolution {
        match self.marks.get(&id) {
            Some(Mark::Done(resolution)) => return *resolution,
            Some(Mark::Visiting) => {
                self.report_cycle(id);
                return Resolution::Unresolved;
            }
            None => {}
        }

        // Callers only visit ids present in the index
        let Some(item) = self.items.get(&id).copied() else {
            return Resolution::Unresolved;
        };

        let resolution = match item.linkage() {
            None => Resolution::Resolved(item.yearly_value),
            // Follows a balance; only the year loop can value it
            Some(link) if link.cadence() == LinkCadence::PerYearBalance => Resolution::Unresolved,
            Some(link) => match self.chain_target(link.target_type, link.target_id) {
                None => {
                    self.issues.push(LinkageIssue::MissingTarget {
                        item: id,
                        target_type: link.target_type,
                        target_id: link.target_id,
                    });
                    Resolution::Unresolved
                }
                Some(target) => {
                    self.marks.insert(id, Mark::Visiting);
                    self.stack.push(id);
                    let target_resolution = self.visit(target);
                    self.stack.pop();

                    match target_resolution {
                        Resolution::Resolved(value) => Resolution::Resolved(link.derive(value)),
                        Resolution::Unresolved => {
                            if !self.in_cycle.contains(&id) {
                                self.issues.push(LinkageIssue::UnresolvedTarget {
                                    item: id,
                                    target_id: target,
                                });
                            }
                            Resolution::Unresolved
                        }
                    }
                }
            },
        };

        self.marks.insert(id, Mark::Done(resolution));
        resolution
    }

    /// The target of a chain link, if it exists with the declared direction
    fn chain_target(&self, target_type: ItemKind, target_id: ItemId) -> Option<ItemId> {
        self.items
            .get(&target_id)
            .filter(|target| target.kind() == target_type)
            .map(|target| target.id)
    }

    fn report_cycle(&mut self, reentered: ItemId) {
        let start = self
            .stack
            .iter()
            .position(|id| *id == reentered)
            .unwrap_or(0);
        let path = self.stack[start..].to_vec();
        self.in_cycle.extend(path.iter().copied());
        self.issues.push(LinkageIssue::Cycle { path });
    }
}

/// Resolve every income/expense chain among `items`
///
/// Static items resolve to their stored `yearly_value`. Dynamic items linked
/// to another cash flow resolve to `target × percentage / 100`, following the
/// chain to any depth. Cycles, missing targets and chains that end in a
/// balance-linked item resolve to nothing and are reported in `issues`.
#[must_use]
pub fn resolve_chains(items: &[CashFlowItem]) -> ChainResolution {
    let mut resolver = Resolver::new(items);

    for item in items {
        if item.cadence() != Some(LinkCadence::PerYearBalance) {
            resolver.visit(item.id);
        }
    }

    let values = resolver
        .marks
        .into_iter()
        .filter_map(|(id, mark)| match mark {
            Mark::Done(resolution) => Some((id, resolution)),
            Mark::Visiting => None,
        })
        .collect();

    ChainResolution {
        values,
        issues: resolver.issues,
    }
}
