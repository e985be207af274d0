use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{COLS, VALUE_MAX, VALUE_MIN};

pub type BlockId = u64;

/// A numbered cell occupant. The id is stable for the block's lifetime and is
/// what the renderer keys highlight/flash state on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub value: u8,
}

/// Hands out blocks with fresh ids and uniformly drawn values.
pub struct BlockSource {
    rng: StdRng,
    next_id: BlockId,
}

impl BlockSource {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng, next_id: 1 }
    }

    pub fn next_block(&mut self) -> Block {
        let id = self.next_id;
        self.next_id += 1;
        Block {
            id,
            value: self.rng.gen_range(VALUE_MIN..=VALUE_MAX),
        }
    }

    pub fn generate_row(&mut self) -> [Block; COLS] {
        std::array::from_fn(|_| self.next_block())
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
