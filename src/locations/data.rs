//! Market location definitions.
//!
//! Locations decide which customer pool the player haggles with. The
//! engine only cares about unlock gating and the customer tier; layout,
//! art and stall dialogue live with the front-end.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::core::unlocks::RequirementResolver;

/// Which customer pool a location draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationTier {
    Basic,
    Intermediate,
    Advanced,
    Premium,
}

/// Static definition of one market location.
#[derive(Debug, Clone)]
pub struct LocationDef {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: LocationTier,
    pub default_unlocked: bool,
    pub unlock_level: Option<u32>,
    pub special_requirement: Option<&'static str>,
}

/// Returns all market locations.
pub fn get_all_locations() -> Vec<LocationDef> {
    vec![
        LocationDef {
            id: "products",
            name: "Grocery Row",
            tier: LocationTier::Basic,
            default_unlocked: true,
            unlock_level: None,
            special_requirement: None,
        },
        LocationDef {
            id: "clothing",
            name: "Clothing Stalls",
            tier: LocationTier::Basic,
            default_unlocked: true,
            unlock_level: None,
            special_requirement: None,
        },
        LocationDef {
            id: "electronics",
            name: "Electronics Corner",
            tier: LocationTier::Intermediate,
            default_unlocked: false,
            unlock_level: Some(2),
            special_requirement: None,
        },
        LocationDef {
            id: "furniture",
            name: "Furniture Yard",
            tier: LocationTier::Intermediate,
            default_unlocked: false,
            unlock_level: Some(3),
            special_requirement: None,
        },
        LocationDef {
            id: "business",
            name: "Business Quarter",
            tier: LocationTier::Advanced,
            default_unlocked: false,
            unlock_level: Some(5),
            special_requirement: None,
        },
        LocationDef {
            id: "industrial",
            name: "Industrial Outskirts",
            tier: LocationTier::Advanced,
            default_unlocked: false,
            unlock_level: Some(7),
            special_requirement: None,
        },
        LocationDef {
            id: "station",
            name: "Central Station",
            tier: LocationTier::Advanced,
            default_unlocked: false,
            unlock_level: Some(10),
            special_requirement: None,
        },
        LocationDef {
            id: "wholesale_depot",
            name: "Wholesale Depot",
            tier: LocationTier::Premium,
            default_unlocked: false,
            unlock_level: None,
            special_requirement: Some("has_business_license"),
        },
    ]
}

/// Looks up a location by id.
pub fn get_location(id: &str) -> Option<LocationDef> {
    get_all_locations().into_iter().find(|l| l.id == id)
}

/// Location ids granted automatically at exactly this character level.
pub fn locations_unlocked_at(level: u32) -> &'static [&'static str] {
    match level {
        2 => &["electronics"],
        3 => &["furniture"],
        5 => &["business"],
        7 => &["industrial"],
        10 => &["station"],
        _ => &[],
    }
}

/// Checks whether a location is open to a character.
///
/// Open when the location is default-unlocked, the character has explicitly
/// unlocked it, the level gate is met, or its special requirement is
/// satisfied by the resolver.
pub fn is_location_available(
    def: &LocationDef,
    character_level: u32,
    unlocked_locations: &[String],
    resolver: &dyn RequirementResolver,
) -> bool {
    if def.default_unlocked || unlocked_locations.iter().any(|l| l == def.id) {
        return true;
    }
    if let Some(min_level) = def.unlock_level {
        if character_level >= min_level {
            return true;
        }
    }
    if let Some(requirement) = def.special_requirement {
        return resolver.is_satisfied(requirement);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::unlocks::NoRequirements;

    #[test]
    fn test_location_ids_unique() {
        let locations = get_all_locations();
        for location in &locations {
            let count = locations.iter().filter(|l| l.id == location.id).count();
            assert_eq!(count, 1, "duplicate location id {}", location.id);
        }
    }

    #[test]
    fn test_get_location_unknown() {
        assert!(get_location("casino").is_none());
    }

    #[test]
    fn test_default_locations_open() {
        let def = get_location("products").unwrap();
        assert!(is_location_available(&def, 1, &[], &NoRequirements));
    }

    #[test]
    fn test_level_gate() {
        let def = get_location("business").unwrap();
        assert!(!is_location_available(&def, 4, &[], &NoRequirements));
        assert!(is_location_available(&def, 5, &[], &NoRequirements));
    }

    #[test]
    fn test_explicit_unlock_overrides_gate() {
        let def = get_location("station").unwrap();
        let unlocked = vec!["station".to_string()];
        assert!(is_location_available(&def, 1, &unlocked, &NoRequirements));
    }

    #[test]
    fn test_special_requirement_location() {
        let def = get_location("wholesale_depot").unwrap();
        assert!(!is_location_available(&def, 50, &[], &NoRequirements));
        let resolver = |req: &str| req == "has_business_license";
        assert!(is_location_available(&def, 1, &[], &resolver));
    }

    #[test]
    fn test_level_unlock_table_matches_gates() {
        for level in [2, 3, 5, 7, 10] {
            for id in locations_unlocked_at(level) {
                let def = get_location(id).unwrap();
                assert_eq!(def.unlock_level, Some(level));
            }
        }
        assert!(locations_unlocked_at(4).is_empty());
    }
}
