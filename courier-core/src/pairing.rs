//! Pickup/drop-off pairing lookup built once per optimization call.
//!
//! Optimizers address stops by their position in the input slice. The
//! [`PairIndex`] resolves every drop-off to the position of its pickup and
//! answers the precedence question shared by all strategies: may this stop be
//! visited next, given what has been visited so far?

use std::collections::HashMap;

use crate::{InfeasibleRouteError, VisitKind, VisitNode};

#[derive(Debug, Default, Clone, Copy)]
struct GroupSlots {
    pickup: Option<usize>,
    dropoff: Option<usize>,
}

/// Precedence lookup over a slice of [`VisitNode`]s.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use courier_core::{PairIndex, VisitNode};
///
/// let nodes = vec![
///     VisitNode::dropoff("O1", "C1", Coord { x: 1.0, y: 0.0 }),
///     VisitNode::pickup("O1", "R1", Coord { x: 0.0, y: 0.0 }, Duration::ZERO),
/// ];
/// let index = PairIndex::build(&nodes)?;
///
/// let mut visited = vec![false; nodes.len()];
/// assert!(!index.is_feasible(0, &visited));
/// assert!(index.is_feasible(1, &visited));
/// visited[1] = true;
/// assert!(index.is_feasible(0, &visited));
/// # Ok::<(), courier_core::InfeasibleRouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairIndex {
    /// For each stop, the position of its group's pickup (itself for pickups).
    pickup_of: Vec<usize>,
}

impl PairIndex {
    /// Validate the pairing of `nodes` and build the lookup.
    ///
    /// Fails fast when a group lacks a pickup or a drop-off or holds more
    /// than one of either. Errors refer to the first offending group in
    /// input order.
    pub fn build(nodes: &[VisitNode]) -> Result<Self, InfeasibleRouteError> {
        let mut groups: HashMap<&str, GroupSlots> = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            let slots = groups.entry(node.group_id.as_str()).or_default();
            let slot = match node.kind {
                VisitKind::Pickup => &mut slots.pickup,
                VisitKind::Dropoff => &mut slots.dropoff,
            };
            if slot.replace(position).is_some() {
                return Err(InfeasibleRouteError::DuplicateVisit {
                    group_id: node.group_id.clone(),
                    kind: node.kind,
                });
            }
        }

        let mut pickup_of = Vec::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            let slots = groups
                .get(node.group_id.as_str())
                .copied()
                .unwrap_or_default();
            let Some(pickup) = slots.pickup else {
                return Err(InfeasibleRouteError::MissingPickup {
                    group_id: node.group_id.clone(),
                });
            };
            if slots.dropoff.is_none() {
                return Err(InfeasibleRouteError::MissingDropoff {
                    group_id: node.group_id.clone(),
                });
            }
            debug_assert!(node.kind == VisitKind::Dropoff || pickup == position);
            pickup_of.push(pickup);
        }

        Ok(Self { pickup_of })
    }

    /// Number of stops covered by the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pickup_of.len()
    }

    /// Return `true` when the index covers no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pickup_of.is_empty()
    }

    /// Position of the pickup paired with the stop at `position`.
    ///
    /// Pickups map to themselves.
    #[must_use]
    pub fn pickup_of(&self, position: usize) -> Option<usize> {
        self.pickup_of.get(position).copied()
    }

    /// Whether the stop at `position` may be visited next.
    ///
    /// `visited` is indexed by stop position. A pickup is feasible while it is
    /// unvisited; a drop-off additionally requires its pickup to be visited.
    #[must_use]
    pub fn is_feasible(&self, position: usize, visited: &[bool]) -> bool {
        let seen = |at: usize| visited.get(at).copied().unwrap_or(false);
        match self.pickup_of(position) {
            Some(pickup) => !seen(position) && (pickup == position || seen(pickup)),
            None => false,
        }
    }
}
