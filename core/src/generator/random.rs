use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Seeded deal: picks the symbols, doubles them, then shuffles the whole deck uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let chosen = pick_symbols(config.pair_count, config.symbol_pick, &mut rng);
        let symbols = shuffle_pairs(&chosen, &mut rng);

        log::debug!(
            "dealt {} pairs ({:?}) with seed {}",
            config.pair_count,
            config.symbol_pick,
            self.seed
        );
        Deck::from_parts(config.pair_count, &symbols)
    }
}

/// Chooses `pair_count` distinct symbols from the pool.
pub fn pick_symbols<R: Rng + ?Sized>(
    pair_count: PairCount,
    pick: SymbolPick,
    rng: &mut R,
) -> Vec<Symbol> {
    match pick {
        SymbolPick::Leading => Symbol::pool().take(pair_count.get()).collect(),
        SymbolPick::Random => rand::seq::index::sample(rng, SYMBOL_POOL_SIZE, pair_count.get())
            .into_iter()
            .map(Symbol::from_pool_index)
            .collect(),
    }
}

/// Doubles every symbol and applies a Fisher-Yates shuffle to the result.
pub fn shuffle_pairs<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Vec<Symbol> {
    let mut deck = Vec::with_capacity(symbols.len() * 2);
    deck.extend_from_slice(symbols);
    deck.extend_from_slice(symbols);
    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;

    fn deal(pair_count: PairCount, pick: SymbolPick, seed: u64) -> Deck {
        let config = GameConfig::new(pair_count).with_symbol_pick(pick);
        RandomDeckGenerator::new(seed).generate(&config)
    }

    #[test]
    fn every_size_deals_each_symbol_exactly_twice() {
        for pair_count in PairCount::ALL {
            for seed in 0..50 {
                let deck = deal(pair_count, SymbolPick::Random, seed);

                assert_eq!(deck.len(), pair_count.total_cards());
                assert_eq!(deck.pair_count(), pair_count);
                assert_eq!(deck.validate(), Ok(()));

                let mut counts = BTreeMap::new();
                for symbol in deck.symbols() {
                    *counts.entry(symbol).or_insert(0) += 1;
                }
                assert_eq!(counts.len(), pair_count.get());
                assert!(counts.values().all(|&count| count == 2));
            }
        }
    }

    #[test]
    fn fresh_deal_is_face_down_with_sequential_ids() {
        let deck = deal(PairCount::Six, SymbolPick::Random, 99);

        for (index, card) in deck.iter().enumerate() {
            assert_eq!(usize::from(card.id()), index);
            assert_eq!(card.face(), CardFace::FaceDown);
        }
    }

    #[test]
    fn same_seed_deals_same_deck() {
        let a = deal(PairCount::Twelve, SymbolPick::Random, 1234);
        let b = deal(PairCount::Twelve, SymbolPick::Random, 1234);
        assert_eq!(a, b);
    }

    #[test]
    fn leading_pick_uses_first_symbols_of_pool() {
        for pair_count in PairCount::ALL {
            let deck = deal(pair_count, SymbolPick::Leading, 7);
            let expected: Vec<_> = Symbol::pool().take(pair_count.get()).collect();
            let mut used: Vec<_> = deck.symbols().collect();
            used.sort();
            used.dedup();
            assert_eq!(used, expected);
        }
    }

    #[test]
    fn random_pick_eventually_uses_whole_pool() {
        let mut seen = [false; SYMBOL_POOL_SIZE];
        for seed in 0..200 {
            for symbol in deal(PairCount::Three, SymbolPick::Random, seed).symbols() {
                seen[usize::from(symbol.index())] = true;
            }
        }
        assert!(seen.iter().all(|&seen| seen));
    }

    /// Chi-square statistic of observed counts against a uniform expectation.
    fn chi_square(observed: impl Iterator<Item = u32>, expected: f64) -> f64 {
        observed
            .map(|count| {
                let diff = f64::from(count) - expected;
                diff * diff / expected
            })
            .sum()
    }

    #[test]
    fn shuffle_puts_each_symbol_uniformly_at_each_position() {
        const TRIALS: u32 = 6000;
        let symbols: Vec<_> = Symbol::pool().take(3).collect();
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut counts = [[0u32; 3]; 6];

        for _ in 0..TRIALS {
            let deck = shuffle_pairs(&symbols, &mut rng);
            for (position, symbol) in deck.iter().enumerate() {
                counts[position][usize::from(symbol.index())] += 1;
            }
        }

        let expected = f64::from(TRIALS) / 3.0;
        for position in counts {
            // 2 degrees of freedom, far beyond the 0.1% critical value of 13.8
            assert!(chi_square(position.into_iter(), expected) < 25.0);
        }
    }

    #[test]
    fn shuffle_covers_all_arrangements_uniformly() {
        // 6! / (2! * 2! * 2!) distinct arrangements of three pairs
        const ARRANGEMENTS: u32 = 90;
        const TRIALS: u32 = ARRANGEMENTS * 200;
        let symbols: Vec<_> = Symbol::pool().take(3).collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts: BTreeMap<Vec<Symbol>, u32> = BTreeMap::new();

        for _ in 0..TRIALS {
            *counts.entry(shuffle_pairs(&symbols, &mut rng)).or_insert(0) += 1;
        }

        assert_eq!(counts.len() as u32, ARRANGEMENTS);
        // 89 degrees of freedom, 0.01% critical value is about 140
        let expected = f64::from(TRIALS) / f64::from(ARRANGEMENTS);
        assert!(chi_square(counts.into_values(), expected) < 170.0);
    }
}
