//! Collection wrapper types for displaying groups of results.

use std::fmt;

use crate::{mutations::PlanMutation, repair::RepairPlan};

/// A batch of mutations as a bullet list.
pub struct Mutations<'a>(pub &'a [PlanMutation]);

impl fmt::Display for Mutations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No changes.");
        }
        for mutation in self.0 {
            writeln!(f, "- {mutation}")?;
        }
        Ok(())
    }
}

/// Repairs from a sweep, one section per sequence.
#[derive(Debug, Clone, Default)]
pub struct Repairs(pub Vec<RepairPlan>);

impl Repairs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepairPlan> {
        self.0.iter()
    }

    /// Every repair as one batch of mutations.
    pub fn to_mutations(&self) -> Vec<PlanMutation> {
        self.0.iter().flat_map(RepairPlan::to_mutations).collect()
    }
}

impl<'a> IntoIterator for &'a Repairs {
    type Item = &'a RepairPlan;
    type IntoIter = std::slice::Iter<'a, RepairPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Repairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Sequence repair")?;
        writeln!(f)?;
        if self.0.is_empty() {
            return writeln!(f, "All sequences are healthy.");
        }
        for repair in &self.0 {
            writeln!(f, "{repair}")?;
        }
        Ok(())
    }
}
