//! Equipment inventory and the availability interface used by the generator.

use crate::{Equipment, EquipmentKind, Error, Result};
use serde::{Deserialize, Serialize};

/// Supplies the user's current equipment
pub trait EquipmentSource {
    fn available_equipment(&self) -> Vec<Equipment>;

    /// Identifiers of everything currently available
    fn available_kinds(&self) -> Vec<EquipmentKind> {
        self.available_equipment().iter().map(|e| e.kind).collect()
    }
}

/// Every known piece of equipment with its availability flag
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    pub items: Vec<Equipment>,
}

impl Inventory {
    /// Inventory listing all equipment, marking `available` as on
    ///
    /// Bodyweight is always available.
    pub fn with_available(available: &[EquipmentKind]) -> Self {
        let items = EquipmentKind::ALL
            .iter()
            .map(|kind| {
                let on = *kind == EquipmentKind::Bodyweight || available.contains(kind);
                Equipment::new(*kind, on)
            })
            .collect();
        Self { items }
    }

    pub fn get(&self, kind: EquipmentKind) -> Option<&Equipment> {
        self.items.iter().find(|e| e.kind == kind)
    }

    fn get_mut(&mut self, kind: EquipmentKind) -> Result<&mut Equipment> {
        self.items
            .iter_mut()
            .find(|e| e.kind == kind)
            .ok_or_else(|| Error::Validation(format!("{:?} is not in the inventory", kind)))
    }

    /// Flip availability of one item; returns the new value
    pub fn toggle(&mut self, kind: EquipmentKind) -> Result<bool> {
        if kind == EquipmentKind::Bodyweight {
            return Err(Error::Validation("bodyweight cannot be toggled".into()));
        }
        let item = self.get_mut(kind)?;
        let now = item.toggle();
        tracing::info!("{} is now {}", item.name, if now { "available" } else { "unavailable" });
        Ok(now)
    }

    pub fn set_available(&mut self, kind: EquipmentKind, available: bool) -> Result<()> {
        let item = self.get_mut(kind)?;
        if item.available != available {
            item.toggle();
        }
        Ok(())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_available(&[])
    }
}

impl EquipmentSource for Inventory {
    fn available_equipment(&self) -> Vec<Equipment> {
        self.items.iter().filter(|e| e.available).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inventory_is_bodyweight_only() {
        let inventory = Inventory::default();
        assert_eq!(inventory.items.len(), EquipmentKind::ALL.len());
        assert_eq!(inventory.available_kinds(), vec![EquipmentKind::Bodyweight]);
    }

    #[test]
    fn test_with_available() {
        let inventory = Inventory::with_available(&[EquipmentKind::Barbell]);
        assert!(inventory.get(EquipmentKind::Barbell).unwrap().available);
        assert!(!inventory.get(EquipmentKind::Dumbbells).unwrap().available);
    }

    #[test]
    fn test_toggle() {
        let mut inventory = Inventory::default();
        assert!(inventory.toggle(EquipmentKind::Kettlebell).unwrap());
        assert!(inventory
            .available_kinds()
            .contains(&EquipmentKind::Kettlebell));

        assert!(!inventory.toggle(EquipmentKind::Kettlebell).unwrap());
        assert!(!inventory
            .available_kinds()
            .contains(&EquipmentKind::Kettlebell));
    }

    #[test]
    fn test_bodyweight_cannot_be_toggled() {
        let mut inventory = Inventory::default();
        assert!(inventory.toggle(EquipmentKind::Bodyweight).is_err());
    }

    #[test]
    fn test_set_available_is_idempotent() {
        let mut inventory = Inventory::default();
        inventory.set_available(EquipmentKind::Bench, true).unwrap();
        inventory.set_available(EquipmentKind::Bench, true).unwrap();
        assert!(inventory.get(EquipmentKind::Bench).unwrap().available);
    }

    #[test]
    fn test_missing_item_is_an_error() {
        let mut inventory = Inventory { items: vec![] };
        assert!(matches!(
            inventory.toggle(EquipmentKind::Barbell),
            Err(Error::Validation(_))
        ));
    }
}
