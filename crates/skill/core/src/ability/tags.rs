//! Two independent classification axes for abilities.
//!
//! Delivery tags drive which scoped stat buckets apply; trait tags refine how a
//! behavior resolves (homing, pierce, ...). Both are sets: an ability may be
//! Area and DOT at once and receives every matching bonus.

use bitflags::bitflags;

bitflags! {
    /// How an ability delivers its damage.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeliveryTags: u8 {
        const PROJECTILE = 1 << 0;
        const AREA = 1 << 1;
        const DOT = 1 << 2;
    }
}

bitflags! {
    /// Secondary behavioral classification.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TraitTags: u8 {
        const HOMING = 1 << 0;
        const PIERCE = 1 << 1;
        const INSTANT = 1 << 2;
        const SINGLE_TARGET = 1 << 3;
        const MULTI_TARGET = 1 << 4;
        const CHAIN = 1 << 5;
        const EXPLOSIVE = 1 << 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_tags_allow_multi_membership() {
        let tags = DeliveryTags::AREA | DeliveryTags::DOT;
        assert!(tags.contains(DeliveryTags::AREA));
        assert!(tags.contains(DeliveryTags::DOT));
        assert!(!tags.contains(DeliveryTags::PROJECTILE));
    }
}
