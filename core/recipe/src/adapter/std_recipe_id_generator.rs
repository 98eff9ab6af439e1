//! RecipeId の標準実装: `recipe-<unix ms>-<base36 9 文字>`
//!
//! 乱数部分は暗号学的な一意性を持たない。衝突確率は低いが 0 ではない。

use crate::domain::RecipeId;
use crate::ports::outbound::RecipeIdGenerator;
use common::ports::outbound::Clock;
use rand::Rng;
use std::sync::Arc;

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Clock + 乱数で RecipeId を生成する標準実装
pub struct StdRecipeIdGenerator {
    clock: Arc<dyn Clock>,
}

impl StdRecipeIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl RecipeIdGenerator for StdRecipeIdGenerator {
    fn next_id(&self) -> RecipeId {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        RecipeId::new(format!("recipe-{}-{}", self.clock.now_ms(), suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_id_format() {
        let gen = StdRecipeIdGenerator::new(Arc::new(FixedClock(1_700_000_000_000)));
        let id = gen.next_id();
        let rest = id.strip_prefix("recipe-1700000000000-").unwrap();
        assert_eq!(rest.len(), SUFFIX_LEN);
        assert!(rest.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_differ_within_same_ms() {
        let gen = StdRecipeIdGenerator::new(Arc::new(FixedClock(1)));
        let ids: std::collections::HashSet<String> =
            (0..20).map(|_| gen.next_id().to_string()).collect();
        assert!(ids.len() > 1);
    }
}
