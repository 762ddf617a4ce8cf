use crate::TypeId;
use serde::{Deserialize, Serialize};

/// An elemental type and its damage relations, in both directions.
///
/// Only the `*_from` lists are consulted when resolving damage: the
/// defender's types decide how much a move's type hurts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeData {
    pub id: TypeId,
    pub name: String,
    #[serde(default)]
    pub double_damage_from: Vec<TypeId>,
    #[serde(default)]
    pub double_damage_to: Vec<TypeId>,
    #[serde(default)]
    pub half_damage_from: Vec<TypeId>,
    #[serde(default)]
    pub half_damage_to: Vec<TypeId>,
    #[serde(default)]
    pub no_damage_from: Vec<TypeId>,
    #[serde(default)]
    pub no_damage_to: Vec<TypeId>,
}

impl TypeData {
    /// Multiplier this type applies to an incoming move of `attacking` type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn multiplier_from(&self, attacking: TypeId) -> f64 {
        let mut factor = 1.0;
        if self.double_damage_from.contains(&attacking) {
            factor *= 2.0;
        }
        if self.half_damage_from.contains(&attacking) {
            factor /= 2.0;
        }
        if self.no_damage_from.contains(&attacking) {
            factor *= 0.0;
        }
        factor
    }

    pub fn is_immune_to(&self, attacking: TypeId) -> bool {
        self.no_damage_from.contains(&attacking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass() -> TypeData {
        TypeData {
            id: 12,
            name: "grass".to_string(),
            double_damage_from: vec![3, 4, 7, 10],
            double_damage_to: vec![5, 6, 11],
            half_damage_from: vec![5, 11, 12, 13],
            half_damage_to: vec![3, 4, 7, 10, 12],
            no_damage_from: vec![],
            no_damage_to: vec![],
        }
    }

    #[test]
    fn test_multiplier_from() {
        let grass = grass();
        assert_eq!(grass.multiplier_from(10), 2.0); // fire
        assert_eq!(grass.multiplier_from(11), 0.5); // water
        assert_eq!(grass.multiplier_from(1), 1.0); // normal
        assert!(!grass.is_immune_to(1));
    }
}
