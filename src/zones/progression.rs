//! Area navigation rules: bounds and level gates.

use super::data::Area;
use crate::core::error::NavigationError;

/// Direction of a requested area move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaMove {
    Next,
    Previous,
}

/// Looks up an area by id.
pub fn area_by_id(areas: &[Area], id: u32) -> Option<&Area> {
    areas.iter().find(|area| area.id == id)
}

/// Resolves the destination of a move from `current` at `level`.
pub fn destination(
    areas: &[Area],
    current: Option<u32>,
    level: u32,
    direction: AreaMove,
) -> Result<u32, NavigationError> {
    let current = current.ok_or(NavigationError::NoActiveArea)?;
    match direction {
        AreaMove::Previous => {
            if current <= 1 || area_by_id(areas, current - 1).is_none() {
                return Err(NavigationError::NoPreviousArea);
            }
            Ok(current - 1)
        }
        AreaMove::Next => {
            let next = area_by_id(areas, current + 1).ok_or(NavigationError::NoNextArea)?;
            if level < next.level_requirement {
                return Err(NavigationError::LevelTooLow {
                    required: next.level_requirement,
                });
            }
            Ok(next.id)
        }
    }
}

/// True when `level` exactly meets the gate of the area after `current`.
///
/// Checked after each level-up, so the unlock notice fires once per gate.
pub fn unlocks_next_area(areas: &[Area], current: Option<u32>, level: u32) -> Option<u32> {
    let next = area_by_id(areas, current? + 1)?;
    (next.level_requirement == level).then_some(next.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::data::get_all_areas;

    #[test]
    fn test_cannot_move_before_first_area() {
        let areas = get_all_areas();
        assert_eq!(
            destination(&areas, Some(1), 10, AreaMove::Previous),
            Err(NavigationError::NoPreviousArea)
        );
        assert_eq!(destination(&areas, Some(3), 1, AreaMove::Previous), Ok(2));
    }

    #[test]
    fn test_cannot_move_past_last_area() {
        let areas = get_all_areas();
        assert_eq!(
            destination(&areas, Some(4), 10, AreaMove::Next),
            Err(NavigationError::NoNextArea)
        );
    }

    #[test]
    fn test_level_gate_blocks_advance() {
        let areas = get_all_areas();
        assert_eq!(
            destination(&areas, Some(1), 1, AreaMove::Next),
            Err(NavigationError::LevelTooLow { required: 2 })
        );
        assert_eq!(destination(&areas, Some(1), 2, AreaMove::Next), Ok(2));
        assert_eq!(destination(&areas, Some(1), 7, AreaMove::Next), Ok(2));
    }

    #[test]
    fn test_no_area_rejects_moves() {
        let areas = get_all_areas();
        assert_eq!(
            destination(&areas, None, 5, AreaMove::Next),
            Err(NavigationError::NoActiveArea)
        );
    }

    #[test]
    fn test_unlock_fires_on_exact_level() {
        let areas = get_all_areas();
        assert_eq!(unlocks_next_area(&areas, Some(1), 2), Some(2));
        assert_eq!(unlocks_next_area(&areas, Some(1), 3), None);
        assert_eq!(unlocks_next_area(&areas, Some(2), 3), Some(3));
        assert_eq!(unlocks_next_area(&areas, Some(4), 10), None);
        assert_eq!(unlocks_next_area(&areas, None, 2), None);
    }
}
