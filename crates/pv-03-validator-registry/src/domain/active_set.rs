//! Ordered active-validator set with O(1) membership and removal.

use shared_types::Address;
use std::collections::HashMap;

/// Active validators in join order, until a removal swaps the last member
/// into the freed slot.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    members: Vec<Address>,
    positions: HashMap<Address, usize>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Returns false if already present.
    pub fn insert(&mut self, address: Address) -> bool {
        if self.positions.contains_key(&address) {
            return false;
        }
        self.positions.insert(address, self.members.len());
        self.members.push(address);
        true
    }

    /// Remove a member by swapping the last one into its slot.
    pub fn remove(&mut self, address: &Address) -> bool {
        let Some(index) = self.positions.remove(address) else {
            return false;
        };
        self.members.swap_remove(index);
        if let Some(moved) = self.members.get(index) {
            self.positions.insert(*moved, index);
        }
        true
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.positions.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
