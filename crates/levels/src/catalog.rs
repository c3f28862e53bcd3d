//! Hazard selection from the per-world catalog.
//!
//! The catalog lists hazard types newly unlocked per world; a world's pool
//! is the union of every entry up to and including its own. Selection is a
//! seeded partial Fisher-Yates shuffle, so a level's hazard list is a pure
//! function of its hazard seed and the catalog.

use scrubgen_core::Xorshift64;

/// Hazard types available in `world`: the flattened catalog rows for
/// worlds `1..=world`.
///
/// If that pool comes up empty (leading catalog rows may legitimately be
/// empty), the whole catalog is used instead so selection always has
/// something to draw from.
pub fn unlocked_hazards(catalog: &[Vec<String>], world: u32) -> Vec<&str> {
    let rows = (world as usize).min(catalog.len()).max(1);
    let pool: Vec<&str> = catalog[..rows.min(catalog.len())]
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    if pool.is_empty() {
        catalog.iter().flatten().map(String::as_str).collect()
    } else {
        pool
    }
}

/// Selects `count` hazard names for a level.
///
/// Shuffles the unlocked pool with the hazard seed and takes the first
/// `count`; when `count` exceeds the pool, the shuffled order repeats so
/// the list still has the requested length.
pub fn select_hazards(catalog: &[Vec<String>], world: u32, count: u32, seed: u64) -> Vec<String> {
    let pool = unlocked_hazards(catalog, world);
    if pool.is_empty() {
        return Vec::new();
    }

    let mut shuffled: Vec<&str> = pool;
    let mut rng = Xorshift64::new(seed);
    // Fisher-Yates, back to front.
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_usize(i + 1);
        shuffled.swap(i, j);
    }

    (0..count as usize)
        .map(|i| shuffled[i % shuffled.len()].to_owned())
        .collect()
}
