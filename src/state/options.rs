//! Multiple-choice option generation for a round.

use rand::{Rng, seq::IndexedRandom};

use crate::state::game::Track;

/// Build the `option_count` track names shown for a round.
///
/// Decoys are drawn uniformly from the pool minus the correct track,
/// without replacement while enough candidates remain. Pools too small to
/// supply `option_count - 1` distinct decoys fall back to sampling with
/// replacement, so repeated names can appear instead of an error. The
/// correct name lands at a uniformly random position.
///
/// The returned sequence always has exactly `option_count` entries and
/// contains the correct name at least once; a sampling defect is repaired
/// in place rather than surfaced to the caller.
pub fn generate_options(correct: &Track, pool: &[Track], option_count: usize) -> Vec<String> {
    if option_count == 0 {
        return Vec::new();
    }

    let mut rng = rand::rng();
    let decoy_count = option_count - 1;

    let candidates: Vec<&str> = pool
        .iter()
        .filter(|track| track.id != correct.id)
        .map(|track| track.name.as_str())
        .collect();

    let mut options: Vec<String> = Vec::with_capacity(option_count);
    if candidates.len() < decoy_count {
        // Degraded mode for small pools: repeats allowed.
        for _ in 0..decoy_count {
            if let Some(name) = candidates.choose(&mut rng) {
                options.push((*name).to_owned());
            }
        }
    } else {
        let mut working = candidates;
        for _ in 0..decoy_count {
            let index = rng.random_range(0..working.len());
            options.push(working.swap_remove(index).to_owned());
        }
    }

    let position = rng.random_range(0..=options.len());
    options.insert(position, correct.name.clone());

    while options.len() < option_count {
        options.push(correct.name.clone());
    }
    options.truncate(option_count);
    if !options.iter().any(|name| name == &correct.name) {
        let slot = rng.random_range(0..option_count);
        options[slot] = correct.name.clone();
    }

    options
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn track(id: &str, name: &str) -> Track {
        Track {
            id: id.to_owned(),
            name: name.to_owned(),
            preview_url: format!("https://previews.example/{id}.m4a"),
            artist_id: "artist-1".to_owned(),
        }
    }

    fn pool(size: usize) -> Vec<Track> {
        (0..size)
            .map(|i| track(&format!("t{i}"), &format!("Track {i}")))
            .collect()
    }

    #[test]
    fn returns_exactly_option_count_entries_with_correct_present() {
        for size in 1..=12 {
            let pool = pool(size);
            let options = generate_options(&pool[0], &pool, 4);
            assert_eq!(options.len(), 4, "pool size {size}");
            assert!(options.contains(&pool[0].name), "pool size {size}");
        }
    }

    #[test]
    fn large_pool_yields_distinct_decoys() {
        let pool = pool(10);
        for _ in 0..50 {
            let options = generate_options(&pool[3], &pool, 4);
            let distinct: HashSet<&String> = options.iter().collect();
            assert_eq!(distinct.len(), 4);
        }
    }

    #[test]
    fn decoys_come_from_the_pool_and_exclude_the_correct_track() {
        let pool = pool(8);
        let correct = &pool[2];
        let names: HashSet<&str> = pool.iter().map(|t| t.name.as_str()).collect();
        let options = generate_options(correct, &pool, 4);
        for name in &options {
            assert!(names.contains(name.as_str()));
        }
        assert_eq!(
            options.iter().filter(|n| **n == correct.name).count(),
            1,
            "correct name appears once when decoys are plentiful"
        );
    }

    #[test]
    fn single_track_pool_fills_every_slot_with_the_correct_name() {
        let pool = pool(1);
        let options = generate_options(&pool[0], &pool, 4);
        assert_eq!(options, vec![pool[0].name.clone(); 4]);
    }

    #[test]
    fn undersized_pool_repeats_decoys_instead_of_failing() {
        let pool = pool(3);
        for _ in 0..50 {
            let options = generate_options(&pool[0], &pool, 4);
            assert_eq!(options.len(), 4);
            assert!(options.contains(&pool[0].name));
            for name in &options {
                assert!(pool.iter().any(|t| &t.name == name));
            }
        }
    }

    #[test]
    fn correct_name_lands_at_every_position_eventually() {
        let pool = pool(10);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let options = generate_options(&pool[0], &pool, 4);
            if let Some(position) = options.iter().position(|n| *n == pool[0].name) {
                seen.insert(position);
            }
        }
        assert_eq!(seen, HashSet::from([0, 1, 2, 3]));
    }
}
