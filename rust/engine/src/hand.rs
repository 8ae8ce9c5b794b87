//! Hand evaluation.
//!
//! Every legal five-card hand a player can make is scored and the best one
//! kept. The candidate hands depend on the variant: either any five of the
//! hole and community cards, or exactly `must_use` hole cards combined with
//! the rest from the board. Hi-lo variants additionally look for the lowest
//! qualifying hand among the same candidates.

use crate::cards::{full_deck, Card, Rank};
use crate::errors::GameError;
use crate::rules::GameRules;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Score of a five-card high hand.
///
/// Field order makes the derived `Ord` compare the category first and then
/// the tiebreak ranks lexicographically; a greater value is a better hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// A qualifying low hand: its five distinct ranks, highest first, Ace as 1.
///
/// The derived ordering compares the rank vectors directly, so the better
/// low hand compares `Less`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LowHand {
    pub ranks: [u8; 5],
}

impl LowHand {
    pub fn beats(&self, other: &LowHand) -> bool {
        self.ranks < other.ranks
    }

    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self.ranks.iter().map(|&v| low_symbol(v)).collect();
        format!("{} low", parts.join("-"))
    }
}

/// Best high hand and, in hi-lo games, the best qualifying low hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandEvaluation {
    pub high: HandStrength,
    pub low: Option<LowHand>,
}

/// Evaluates a player's best hand(s) under `rules`.
///
/// # Errors
///
/// Returns [`GameError::InvariantViolation`] when there are too few cards to
/// build a legal five-card hand. Phase gating in the game makes this
/// unreachable in normal play.
pub fn evaluate(
    hole: &[Card],
    community: &[Card],
    rules: &GameRules,
) -> Result<HandEvaluation, GameError> {
    let candidates = candidate_hands(hole, community, rules.hole_cards.must_use)?;

    let mut high: Option<HandStrength> = None;
    let mut low: Option<LowHand> = None;
    for five in &candidates {
        let hs = evaluate_five(five);
        if high.is_none_or(|best| hs > best) {
            high = Some(hs);
        }
        if rules.low_hand.enabled {
            if let Some(lh) = evaluate_low_five(five, rules.low_hand.max_rank) {
                if low.is_none_or(|best| lh.beats(&best)) {
                    low = Some(lh);
                }
            }
        }
    }

    let high = high.ok_or_else(|| {
        GameError::InvariantViolation("no five-card hand could be formed".into())
    })?;
    Ok(HandEvaluation { high, low })
}

/// Best high hand from any five of `cards`, or `None` with fewer than five.
pub fn best_hand(cards: &[Card]) -> Option<HandStrength> {
    if cards.len() < 5 {
        return None;
    }
    combinations(cards, 5)
        .iter()
        .filter_map(|c| <[Card; 5]>::try_from(c.as_slice()).ok())
        .map(|five| evaluate_five(&five))
        .max()
}

/// Unseen cards that would improve the hand if dealt next to the board.
///
/// A card is an out when it lifts the best high hand into a better category,
/// or, in hi-lo games, when it makes a qualifying low where there was none.
/// Cards in `hole` and `community` are the only ones treated as seen. Only
/// the flop and turn have a next card, so any other board yields no outs.
pub fn find_outs(
    hole: &[Card],
    community: &[Card],
    rules: &GameRules,
) -> Result<Vec<Card>, GameError> {
    if !(3..5).contains(&community.len()) || community.len() >= rules.community_cards.count {
        return Ok(Vec::new());
    }
    let current = evaluate(hole, community, rules)?;

    let mut outs = Vec::new();
    let mut board = community.to_vec();
    for card in full_deck() {
        if hole.contains(&card) || community.contains(&card) {
            continue;
        }
        board.push(card);
        let next = evaluate(hole, &board, rules)?;
        board.pop();

        let better_high = next.high.category > current.high.category;
        let new_low = current.low.is_none() && next.low.is_some();
        if better_high || new_low {
            outs.push(card);
        }
    }
    Ok(outs)
}

fn candidate_hands(
    hole: &[Card],
    community: &[Card],
    must_use: Option<usize>,
) -> Result<Vec<[Card; 5]>, GameError> {
    let mut out = Vec::new();
    match must_use {
        None => {
            if hole.len() + community.len() < 5 {
                return Err(GameError::InvariantViolation(format!(
                    "need 5 cards to evaluate, got {} hole + {} community",
                    hole.len(),
                    community.len()
                )));
            }
            let pool: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
            for combo in combinations(&pool, 5) {
                if let Ok(five) = <[Card; 5]>::try_from(combo.as_slice()) {
                    out.push(five);
                }
            }
        }
        Some(n) => {
            let from_board = 5usize.saturating_sub(n);
            if n > 5 || hole.len() < n || community.len() < from_board {
                return Err(GameError::InvariantViolation(format!(
                    "need {} hole + {} community cards, got {} + {}",
                    n,
                    from_board,
                    hole.len(),
                    community.len()
                )));
            }
            let board_combos = combinations(community, from_board);
            for h in combinations(hole, n) {
                for b in &board_combos {
                    let cards: Vec<Card> = h.iter().chain(b.iter()).copied().collect();
                    if let Ok(five) = <[Card; 5]>::try_from(cards.as_slice()) {
                        out.push(five);
                    }
                }
            }
        }
    }
    Ok(out)
}

/// All `k`-card subsets of `cards`, in input order.
pub fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    collect_combinations(cards, k, 0, &mut current, &mut out);
    out
}

fn collect_combinations(
    cards: &[Card],
    k: usize,
    start: usize,
    current: &mut Vec<Card>,
    out: &mut Vec<Vec<Card>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    let needed = k - current.len();
    for i in start..cards.len() {
        if cards.len() - i < needed {
            break;
        }
        current.push(cards[i]);
        collect_combinations(cards, k, i + 1, current, out);
        current.pop();
    }
}

/// Scores exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    for c in cards {
        rank_counts[rank_val(c.rank) as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut uniq: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    uniq.sort_unstable();
    let straight_high = if uniq.len() == 5 {
        detect_straight_high(&uniq)
    } else {
        None
    };

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandStrength {
            category: Category::StraightFlush,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if is_flush {
        let mut k = [0u8; 5];
        for (slot, r) in k.iter_mut().zip(uniq.iter().rev()) {
            *slot = *r;
        }
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trip_ranks, mut pair_ranks, mut singles) = classify_multiples(&rank_counts);
    pair_ranks.sort_unstable_by(|a, b| b.cmp(a));
    singles.sort_unstable_by(|a, b| b.cmp(a));

    if let Some(t) = trip_ranks.first().copied() {
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: [t, singles[0], singles[1], 0, 0],
        };
    }
    if pair_ranks.len() >= 2 {
        return HandStrength {
            category: Category::TwoPair,
            kickers: [pair_ranks[0], pair_ranks[1], singles[0], 0, 0],
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        return HandStrength {
            category: Category::OnePair,
            kickers: [p, singles[0], singles[1], singles[2], 0],
        };
    }

    let mut k = [0u8; 5];
    for (slot, r) in k.iter_mut().zip(singles.iter()) {
        *slot = *r;
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

/// Scores five cards as a low hand; `None` unless they qualify.
///
/// Straights and flushes do not matter, pairs disqualify.
pub fn evaluate_low_five(cards: &[Card; 5], max_rank: u8) -> Option<LowHand> {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.low_value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks.dedup();
    if ranks.len() != 5 || ranks[0] > max_rank {
        return None;
    }
    let mut out = [0u8; 5];
    out.copy_from_slice(&ranks);
    Some(LowHand { ranks: out })
}

impl HandStrength {
    /// Human-readable description, e.g. "Two Pair, Aces and Kings".
    pub fn describe(&self) -> String {
        let k = &self.kickers;
        match self.category {
            Category::HighCard => format!("High Card, {}", rank_name(k[0])),
            Category::OnePair => format!("Pair of {}", rank_plural(k[0])),
            Category::TwoPair => format!(
                "Two Pair, {} and {}",
                rank_plural(k[0]),
                rank_plural(k[1])
            ),
            Category::ThreeOfAKind => format!("Three of a Kind, {}", rank_plural(k[0])),
            Category::Straight => format!("Straight, {} high", rank_name(k[0])),
            Category::Flush => format!("Flush, {} high", rank_name(k[0])),
            Category::FullHouse => format!(
                "Full House, {} full of {}",
                rank_plural(k[0]),
                rank_plural(k[1])
            ),
            Category::FourOfAKind => format!("Four of a Kind, {}", rank_plural(k[0])),
            Category::StraightFlush if k[0] == 14 => "Royal Flush".to_string(),
            Category::StraightFlush => format!("Straight Flush, {} high", rank_name(k[0])),
        }
    }
}

fn rank_name(v: u8) -> &'static str {
    Rank::from_u8(v).map(Rank::name).unwrap_or("?")
}

fn rank_plural(v: u8) -> &'static str {
    Rank::from_u8(v).map(Rank::plural).unwrap_or("?")
}

fn low_symbol(v: u8) -> &'static str {
    if v == 1 {
        return "A";
    }
    Rank::from_u8(v).map(Rank::symbol).unwrap_or("?")
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.len() != 5 {
        return None;
    }
    let v = sorted_unique_ranks;
    if v == [2, 3, 4, 5, 14] {
        // wheel: the Ace plays low
        return Some(5);
    }
    if v.windows(2).all(|w| w[1] == w[0] + 1) {
        Some(v[4])
    } else {
        None
    }
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let trip = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 3)?;
    let pair = (2..=14u8)
        .rev()
        .find(|&r| r != trip && rank_counts[r as usize] == 2)?;
    Some((trip, pair))
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14u8 {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
