//! Damage formulas.

// ============================================================================
// Damage Calculation
// ============================================================================

/// Offensive side of a hit before the target's pipeline runs.
///
/// ```text
/// raw = base_power + modified_attack
/// ```
#[inline]
pub fn raw_damage(base_power: f32, modified_attack: f32) -> f32 {
    base_power + modified_attack
}

/// Final damage of a standard hit after defense.
///
/// # Formula
///
/// ```text
/// final = max(1, raw - modified_defense)
/// ```
///
/// Standard hits that get through every other defensive step always deal at
/// least one point.
#[inline]
pub fn calculate_damage(raw: f32, modified_defense: f32) -> f32 {
    (raw - modified_defense).max(1.0)
}

/// Damage of a direct hit: the amount itself, never negative.
#[inline]
pub fn direct_damage(amount: f32) -> f32 {
    amount.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_never_drops_damage_below_one() {
        let raw = raw_damage(10.0, 0.0);
        assert_eq!(calculate_damage(raw, 1000.0), 1.0);
    }

    #[test]
    fn attack_minus_defense() {
        assert_eq!(calculate_damage(raw_damage(10.0, 25.0), 10.0), 25.0);
    }

    #[test]
    fn direct_damage_floors_at_zero() {
        assert_eq!(direct_damage(-4.0), 0.0);
        assert_eq!(direct_damage(3.5), 3.5);
    }
}
