use rand::{Rng, RngCore};

use crate::engine::stage::{ROW_STAGE_WIDTH, Stage};
use crate::generator::TextGenerator;
use crate::keyboard::layout::{Row, SHIFTED_KEYS, all_row_keys};

/// Sub-levels of a row stage that drill by repetition before going random.
pub const REPETITION_SUB_LEVELS: u32 = 5;
/// Times each key is repeated inside a repetition block.
pub const BLOCK_REPEAT: usize = 4;

/// Keys of a row pool in play at `sub`. Grows with the sub-level and never
/// exceeds the pool.
pub fn pool_prefix_len(pool_len: usize, sub: u32) -> usize {
    let grown = 4 + (sub.min(ROW_STAGE_WIDTH) as usize * 2) / 5;
    grown.min(pool_len)
}

/// `aaaa ssss dddd ffff ...`: the pool in pairs, cycled until `length` keys.
pub fn repetition_drill(pool: &[char], length: usize) -> String {
    let mut out: Vec<char> = Vec::with_capacity(length + BLOCK_REPEAT + 1);
    if pool.is_empty() {
        return String::new();
    }
    'fill: loop {
        for pair in pool.chunks(2) {
            for &key in pair {
                out.extend(std::iter::repeat_n(key, BLOCK_REPEAT));
                out.push(' ');
                if out.len() >= length {
                    break 'fill;
                }
            }
        }
    }
    finish(out, length)
}

/// Uniform draws from `pool` in chunks of 2-4 keys separated by single spaces.
pub fn random_drill(pool: &[char], length: usize, rng: &mut dyn RngCore) -> String {
    let mut out: Vec<char> = Vec::with_capacity(length + 5);
    if pool.is_empty() {
        return String::new();
    }
    while out.len() < length {
        let chunk = rng.gen_range(2..=4);
        for _ in 0..chunk {
            out.push(pool[rng.gen_range(0..pool.len())]);
        }
        out.push(' ');
    }
    finish(out, length)
}

fn finish(mut out: Vec<char>, length: usize) -> String {
    out.truncate(length);
    while out.last() == Some(&' ') {
        out.pop();
    }
    out.into_iter().collect()
}

pub struct RowDrill {
    pub row: Row,
    pub length: usize,
}

impl RowDrill {
    pub fn new(row: Row, length: usize) -> Self {
        Self { row, length }
    }

    pub fn pool(&self, sub: u32) -> &'static [char] {
        let keys = self.row.keys();
        &keys[..pool_prefix_len(keys.len(), sub)]
    }
}

impl TextGenerator for RowDrill {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String {
        let sub = Stage::classify(level).sub_level(level);
        let pool = self.pool(sub);
        if sub < REPETITION_SUB_LEVELS {
            repetition_drill(pool, self.length)
        } else {
            random_drill(pool, self.length, rng)
        }
    }
}

/// Random drill over every row, with shifted keys joining as levels rise.
pub struct MasteryDrill {
    pub length: usize,
}

impl MasteryDrill {
    pub fn pool(level: u32) -> Vec<char> {
        let mut pool = all_row_keys();
        let unlocked = (level.saturating_sub(Stage::MasteryMix.floor() - 1) / 2) as usize;
        pool.extend(SHIFTED_KEYS.chars().take(unlocked));
        pool
    }
}

impl TextGenerator for MasteryDrill {
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> String {
        random_drill(&Self::pool(level), self.length, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::keyboard::layout::HOME_ROW;

    #[test]
    fn repetition_blocks() {
        let text = repetition_drill(&['a', 's', 'd', 'f'], 140);
        assert!(text.starts_with("aaaa ssss dddd ffff aaaa"));
        assert!(text.len() <= 140);
        assert!(text.len() >= 139);
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn repetition_truncates_exactly_when_cut_lands_on_a_key() {
        let text = repetition_drill(&['a', 's'], 12);
        assert_eq!(text, "aaaa ssss aa");
    }

    #[test]
    fn random_chunks_are_two_to_four_keys() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pool = ['a', 's', 'd', 'f', 'g', 'h'];
        let text = random_drill(&pool, 140, &mut rng);
        assert!(text.chars().count() <= 140);
        let chunks: Vec<&str> = text.split(' ').collect();
        // last chunk may be cut by truncation
        for chunk in &chunks[..chunks.len() - 1] {
            assert!((2..=4).contains(&chunk.len()), "bad chunk {chunk:?}");
        }
        assert!(!text.contains("  "));
        assert!(text.chars().all(|c| c == ' ' || pool.contains(&c)));
    }

    #[test]
    fn random_drill_is_seed_reproducible() {
        let pool = ['q', 'w', 'e'];
        let a = random_drill(&pool, 60, &mut SmallRng::seed_from_u64(1));
        let b = random_drill(&pool, 60, &mut SmallRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn pool_prefix_grows_monotonically() {
        let mut prev = 0;
        for sub in 0..ROW_STAGE_WIDTH {
            let len = pool_prefix_len(10, sub);
            assert!(len >= prev);
            assert!(len <= 10);
            prev = len;
        }
        assert_eq!(pool_prefix_len(10, 0), 4);
        assert_eq!(pool_prefix_len(10, 24), 10);
        assert_eq!(pool_prefix_len(9, 24), 9);
    }

    #[test]
    fn row_drill_phases() {
        let drill = RowDrill::new(Row::Home, 140);
        let mut rng = SmallRng::seed_from_u64(3);
        let early = drill.generate(1, &mut rng);
        assert!(early.starts_with("aaaa ssss"));
        let late = drill.generate(20, &mut rng);
        assert!(late.chars().all(|c| c == ' ' || HOME_ROW.contains(&c)));
        assert_eq!(drill.pool(20).len(), 10);
    }

    #[test]
    fn mastery_pool_unlocks_shifted_keys() {
        assert_eq!(MasteryDrill::pool(76).len(), 29);
        assert_eq!(MasteryDrill::pool(77).len(), 30);
        assert!(MasteryDrill::pool(77).contains(&'A'));
        assert_eq!(MasteryDrill::pool(100).len(), 29 + 12);
    }
}
