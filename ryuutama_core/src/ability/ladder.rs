//! Die ladder - die sizes an ability can take

/// Die sizes in ascending order
pub const DIE_LADDER: [u32; 6] = [2, 4, 6, 8, 10, 12];

/// Effective die size after shifting `net_shift` steps along the ladder
///
/// Walks up for positive shifts and down for negative ones, stopping at
/// either end. A base value that is not on the ladder starts one step below
/// the smallest die. The result never drops below `floor`.
pub fn resolve_die_size(base_value: u32, net_shift: i32, floor: u32) -> u32 {
    let start = DIE_LADDER
        .iter()
        .position(|&d| d == base_value)
        .map(|i| i as i32)
        .unwrap_or(-1);
    let last = DIE_LADDER.len() as i32 - 1;
    let index = start.saturating_add(net_shift).clamp(0, last) as usize;

    DIE_LADDER[index].max(floor)
}

/// Step a stored base value along the ladder, bounded below by `floor`
///
/// Used for permanent changes (stat increases) where the stored value itself
/// moves, as opposed to the transient shifts of [`resolve_die_size`].
pub fn step_value(base_value: u32, steps: i32, floor: u32) -> u32 {
    resolve_die_size(base_value.max(floor), steps, floor)
}
