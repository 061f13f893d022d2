//! Static protocol → delegate lookup.

use alloy_primitives::Address;
use std::collections::HashMap;
use txextract_core::context::DelegateResolver;

/// Fixed protocol → delegate map, usually built from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticDelegates {
    by_protocol: HashMap<Address, Address>,
}

impl StaticDelegates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `delegate` for `protocol`, replacing any earlier entry.
    pub fn insert(&mut self, protocol: Address, delegate: Address) -> Option<Address> {
        self.by_protocol.insert(protocol, delegate)
    }

    pub fn len(&self) -> usize {
        self.by_protocol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_protocol.is_empty()
    }
}

impl FromIterator<(Address, Address)> for StaticDelegates {
    fn from_iter<I: IntoIterator<Item = (Address, Address)>>(iter: I) -> Self {
        Self {
            by_protocol: iter.into_iter().collect(),
        }
    }
}

impl DelegateResolver for StaticDelegates {
    fn delegate_for(&self, protocol: &Address) -> Option<Address> {
        self.by_protocol.get(protocol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_protocols_only() {
        let protocol = Address::repeat_byte(0x01);
        let delegate = Address::repeat_byte(0x02);
        let delegates: StaticDelegates = [(protocol, delegate)].into_iter().collect();

        assert_eq!(delegates.delegate_for(&protocol), Some(delegate));
        assert_eq!(delegates.delegate_for(&Address::ZERO), None);
        assert_eq!(delegates.len(), 1);
    }

    #[test]
    fn insert_replaces() {
        let mut delegates = StaticDelegates::new();
        let protocol = Address::repeat_byte(0x01);
        assert!(delegates.insert(protocol, Address::repeat_byte(0x02)).is_none());
        assert_eq!(
            delegates.insert(protocol, Address::repeat_byte(0x03)),
            Some(Address::repeat_byte(0x02))
        );
        assert_eq!(delegates.delegate_for(&protocol), Some(Address::repeat_byte(0x03)));
    }
}
