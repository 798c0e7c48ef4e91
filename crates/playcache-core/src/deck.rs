//! Content shaping between a fetched collection and a playable game:
//! memory deck building, phrase hint masking, and wheel geometry.
//!
//! Everything here is pure and deterministic given an RNG; rendering and
//! interaction stay in the consuming views.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{CardPairRecord, WheelItemRecord};

// ============================================================================
// Memory game
// ============================================================================

/// Supported memory grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    FourByFour,
    SixBySix,
}

impl GridSize {
    pub fn columns(self) -> usize {
        match self {
            GridSize::FourByFour => 4,
            GridSize::SixBySix => 6,
        }
    }

    /// Pairs needed to fill the grid completely.
    pub fn pairs_needed(self) -> usize {
        let cells = self.columns() * self.columns();
        cells / 2
    }
}

/// Face color alternates between the two cards of a pair so matched cards
/// are visually distinct on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceColor {
    Blue,
    Yellow,
}

/// One visual card instance on the memory board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCard {
    pub card_id: i64,
    /// Both cards expanded from the same record share this key.
    pub match_id: i64,
    pub text: String,
    pub color: FaceColor,
}

/// Expand each pair record into its two card instances.
pub fn build_memory_deck(pairs: &[CardPairRecord]) -> Vec<MemoryCard> {
    pairs
        .iter()
        .flat_map(|pair| {
            [
                MemoryCard {
                    card_id: pair.id * 2 - 1,
                    match_id: pair.id,
                    text: pair.text.clone(),
                    color: FaceColor::Blue,
                },
                MemoryCard {
                    card_id: pair.id * 2,
                    match_id: pair.id,
                    text: pair.text.clone(),
                    color: FaceColor::Yellow,
                },
            ]
        })
        .collect()
}

pub fn shuffle_deck<R: Rng>(deck: &mut [MemoryCard], rng: &mut R) {
    deck.shuffle(rng);
}

// ============================================================================
// Phrase hints
// ============================================================================

/// Hangman-style reveal: the first `letters_revealed` letters are shown,
/// the rest are masked with underscores. Whitespace is always shown so the
/// word shape stays readable.
pub fn reveal_hint(word: &str, letters_revealed: usize) -> String {
    let mut shown = 0;
    word.chars()
        .map(|c| {
            if c.is_whitespace() {
                c
            } else if shown < letters_revealed {
                shown += 1;
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ============================================================================
// Roulette wheel
// ============================================================================

/// The wheel always renders this many slices; short collections are padded
/// with placeholder items.
pub const WHEEL_SLICE_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceColor {
    Blue,
    Yellow,
    Red,
    Green,
}

impl SliceColor {
    fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => SliceColor::Blue,
            1 => SliceColor::Yellow,
            2 => SliceColor::Red,
            _ => SliceColor::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelSlice {
    pub text: String,
    pub color: SliceColor,
}

/// Build the rendered wheel: truncate to [`WHEEL_SLICE_COUNT`] items, pad
/// with placeholders if short, and assign slice colors cyclically.
pub fn build_wheel(items: &[WheelItemRecord]) -> Vec<WheelSlice> {
    let mut slices: Vec<WheelSlice> = items
        .iter()
        .take(WHEEL_SLICE_COUNT)
        .enumerate()
        .map(|(index, item)| WheelSlice {
            text: item.text.clone(),
            color: SliceColor::for_index(index),
        })
        .collect();

    while slices.len() < WHEEL_SLICE_COUNT {
        let index = slices.len();
        slices.push(WheelSlice {
            text: format!("Item {}", index + 1),
            color: SliceColor::for_index(index),
        });
    }

    slices
}

pub fn slice_angle(slice_count: usize) -> f64 {
    360.0 / slice_count as f64
}

/// Pick the winning slice for a spin.
pub fn spin<R: Rng>(slice_count: usize, rng: &mut R) -> usize {
    rng.gen_range(0..slice_count)
}

/// Total rotation in degrees that lands the pointer on the center of the
/// winning slice after `full_spins` complete turns.
pub fn spin_rotation(slice_count: usize, winning_index: usize, full_spins: u32) -> f64 {
    let per_slice = slice_angle(slice_count);
    f64::from(full_spins) * 360.0 + (360.0 - per_slice * winning_index as f64 - per_slice / 2.0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_pairs(count: i64) -> Vec<CardPairRecord> {
        (1..=count)
            .map(|id| CardPairRecord {
                id,
                text: format!("Concept {id}"),
            })
            .collect()
    }

    #[test]
    fn test_deck_has_two_cards_per_pair_with_shared_match_id() {
        let deck = build_memory_deck(&sample_pairs(3));
        assert_eq!(deck.len(), 6);

        for pair_id in 1..=3 {
            let cards: Vec<&MemoryCard> =
                deck.iter().filter(|c| c.match_id == pair_id).collect();
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].text, cards[1].text);
            assert_ne!(cards[0].card_id, cards[1].card_id);
            assert_ne!(cards[0].color, cards[1].color);
        }
    }

    #[test]
    fn test_card_ids_are_unique_across_the_deck() {
        let deck = build_memory_deck(&sample_pairs(8));
        let mut ids: Vec<i64> = deck.iter().map(|c| c.card_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_shuffle_preserves_the_deck_contents() {
        let mut deck = build_memory_deck(&sample_pairs(8));
        let mut rng = StdRng::seed_from_u64(7);
        shuffle_deck(&mut deck, &mut rng);

        let mut ids: Vec<i64> = deck.iter().map(|c| c.card_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<i64>>());
    }

    #[test]
    fn test_grid_pairs_needed() {
        assert_eq!(GridSize::FourByFour.pairs_needed(), 8);
        assert_eq!(GridSize::SixBySix.pairs_needed(), 18);
    }

    #[test]
    fn test_reveal_hint_masks_unrevealed_letters() {
        assert_eq!(reveal_hint("Helmet", 0), "______");
        assert_eq!(reveal_hint("Helmet", 2), "He____");
        assert_eq!(reveal_hint("Helmet", 6), "Helmet");
        assert_eq!(reveal_hint("Helmet", 99), "Helmet");
    }

    #[test]
    fn test_reveal_hint_keeps_whitespace_visible() {
        assert_eq!(reveal_hint("ear plugs", 3), "ear _____");
    }

    #[test]
    fn test_wheel_pads_short_collections() {
        let items = vec![WheelItemRecord {
            id: 1,
            text: "Prize".to_string(),
        }];
        let wheel = build_wheel(&items);
        assert_eq!(wheel.len(), WHEEL_SLICE_COUNT);
        assert_eq!(wheel[0].text, "Prize");
        assert_eq!(wheel[1].text, "Item 2");
    }

    #[test]
    fn test_wheel_truncates_long_collections() {
        let items: Vec<WheelItemRecord> = (1..=20)
            .map(|id| WheelItemRecord {
                id,
                text: format!("Item {id}"),
            })
            .collect();
        assert_eq!(build_wheel(&items).len(), WHEEL_SLICE_COUNT);
    }

    #[test]
    fn test_spin_rotation_lands_on_the_winning_slice() {
        let count = WHEEL_SLICE_COUNT;
        let per_slice = slice_angle(count);
        for winning in 0..count {
            let rotation = spin_rotation(count, winning, 5);
            assert!(rotation >= 5.0 * 360.0);

            // Recover the slice under the pointer from the final angle
            let final_angle = rotation % 360.0;
            let landed = ((360.0 - final_angle - per_slice / 2.0) / per_slice).round() as usize;
            assert_eq!(landed % count, winning);
        }
    }

    #[test]
    fn test_spin_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(spin(WHEEL_SLICE_COUNT, &mut rng) < WHEEL_SLICE_COUNT);
        }
    }
}
