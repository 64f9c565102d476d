use crate::foundation::error::{CelticError, CelticResult};
use crate::graph::model::{Direction, EdgeIdx};

/// Tracks which (edge, direction) passages the tracer has already used.
///
/// Two slots per edge. [`EdgeDirectionLedger::find_next_unconsumed`] scans in edge creation
/// order, clockwise before anticlockwise, which is what makes tracing reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDirectionLedger {
    slots: Vec<[bool; 2]>,
}

impl EdgeDirectionLedger {
    pub fn new(edge_count: usize) -> Self {
        Self {
            slots: vec![[false; 2]; edge_count],
        }
    }

    pub fn edge_count(&self) -> usize {
        self.slots.len()
    }

    /// Mark a passage as used. Marking it a second time means the traversal revisited a
    /// state, which only a malformed graph can cause.
    pub fn mark(&mut self, edge: EdgeIdx, direction: Direction) -> CelticResult<()> {
        let slot = self
            .slots
            .get_mut(edge.0 as usize)
            .ok_or_else(|| CelticError::internal(format!("edge {} not in ledger", edge.0)))?;
        let cell = &mut slot[direction.slot()];
        if *cell {
            return Err(CelticError::internal(format!(
                "edge {} already consumed {direction:?}",
                edge.0
            )));
        }
        *cell = true;
        Ok(())
    }

    pub fn is_consumed(&self, edge: EdgeIdx, direction: Direction) -> bool {
        self.slots
            .get(edge.0 as usize)
            .is_some_and(|slot| slot[direction.slot()])
    }

    pub fn find_next_unconsumed(&self) -> Option<(EdgeIdx, Direction)> {
        self.slots.iter().enumerate().find_map(|(i, slot)| {
            Direction::ALL
                .into_iter()
                .find(|d| !slot[d.slot()])
                .map(|d| (EdgeIdx(i as u32), d))
        })
    }

    pub fn consumed_count(&self) -> usize {
        self.slots.iter().flatten().filter(|&&c| c).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot[0] && slot[1])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/ledger.rs"]
mod tests;
