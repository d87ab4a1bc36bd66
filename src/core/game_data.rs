use crate::bestiary::Bestiary;
use crate::core::error::{CatalogError, GameError};
use crate::items::catalog::Catalog;
use crate::zones::{get_all_areas, Area};
use tracing::info;

/// The immutable item, enemy and area tables, built and validated once.
#[derive(Debug, Clone)]
pub struct GameData {
    pub catalog: Catalog,
    pub bestiary: Bestiary,
    pub areas: Vec<Area>,
}

impl GameData {
    pub fn new(catalog: Catalog, bestiary: Bestiary, areas: Vec<Area>) -> Result<Self, GameError> {
        if areas.is_empty() {
            return Err(CatalogError::NoAreas.into());
        }
        for (position, area) in areas.iter().enumerate() {
            if area.id != position as u32 + 1 {
                return Err(CatalogError::BadAreaId {
                    position,
                    found: area.id,
                }
                .into());
            }
            bestiary.validate_area(area)?;
        }
        Ok(Self {
            catalog,
            bestiary,
            areas,
        })
    }

    /// The shipped tables.
    pub fn standard() -> Result<Self, GameError> {
        let catalog = Catalog::standard()?;
        let bestiary = Bestiary::standard(&catalog)?;
        let data = Self::new(catalog, bestiary, get_all_areas())?;
        info!(
            enemies = data.bestiary.enemies().len(),
            areas = data.areas.len(),
            "game data loaded"
        );
        Ok(data)
    }

    pub fn area(&self, id: u32) -> Option<&Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn last_area_id(&self) -> u32 {
        self.areas.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_data_validates() {
        let data = GameData::standard().unwrap();
        assert_eq!(data.last_area_id(), 4);
        assert_eq!(data.area(2).map(|a| a.name), Some("Pink Dolphin Mall"));
        assert!(data.area(5).is_none());
    }

    #[test]
    fn test_rejects_gap_in_area_ids() {
        let catalog = Catalog::standard().unwrap();
        let bestiary = Bestiary::standard(&catalog).unwrap();
        let mut areas = get_all_areas();
        areas.remove(1);
        assert!(matches!(
            GameData::new(catalog, bestiary, areas),
            Err(GameError::Catalog(CatalogError::BadAreaId { position: 1, found: 3 }))
        ));
    }

    #[test]
    fn test_rejects_empty_areas() {
        let catalog = Catalog::standard().unwrap();
        let bestiary = Bestiary::standard(&catalog).unwrap();
        assert!(matches!(
            GameData::new(catalog, bestiary, vec![]),
            Err(GameError::Catalog(CatalogError::NoAreas))
        ));
    }
}
