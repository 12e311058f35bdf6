use indexmap::IndexSet;

use crate::graph::NodeId;

/// Ids entering and leaving the selection in one [`Selection::replace`] call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionDiff {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

/// The set of currently selected node ids, in selection order.
///
/// Zero or more nodes may be selected; every report from the primary graph
/// replaces the previous selection wholesale.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection(IndexSet<NodeId>);

impl Selection {
    /// Replaces the selection with `ids`, returning which ids actually
    /// changed state.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = NodeId>) -> SelectionDiff {
        let next: IndexSet<NodeId> = ids.into_iter().collect();
        let diff = SelectionDiff {
            added: next.difference(&self.0).copied().collect(),
            removed: self.0.difference(&next).copied().collect(),
        };
        self.0 = next;
        diff
    }

    /// Unselect all nodes.
    pub fn clear(&mut self) -> Vec<NodeId> {
        self.0.drain(..).collect()
    }

    /// Iterator of selected ids, in selection order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    /// The id a dependent view should focus on: the most recently selected.
    pub fn focused(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
