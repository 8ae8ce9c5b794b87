//! Hand-strength scoring for CPU decisions.
//!
//! Scores are in `[0, 1]`. Pre-flop hands are rated from the best two-card
//! combination of the hole cards; after the flop the made hand is rated by
//! category and adjusted for drawing potential and, in hi-lo games, for a
//! qualifying low.

use pls7_engine::cards::Card;
use pls7_engine::game::{DecisionContext, Phase};
use pls7_engine::hand::{self, Category};

/// Strength of the hand described by `ctx`.
pub fn hand_strength(ctx: &DecisionContext) -> f64 {
    let preflop = preflop_strength(&ctx.hole_cards);
    if ctx.phase == Phase::PreFlop || ctx.community_cards.is_empty() {
        let low_bonus = if ctx.rules.low_hand.enabled {
            low_potential(&ctx.hole_cards, ctx.rules.low_hand.max_rank)
        } else {
            0.0
        };
        return (preflop + low_bonus).clamp(0.0, 1.0);
    }

    let eval = match hand::evaluate(&ctx.hole_cards, &ctx.community_cards, &ctx.rules) {
        Ok(eval) => eval,
        Err(_) => return preflop,
    };

    let mut score = category_score(eval.high.category);
    if matches!(eval.high.category, Category::HighCard | Category::OnePair) && eval.high.kickers[0] >= 12 {
        score += 0.05;
    }
    if ctx.community_cards.len() >= 5 {
        if let Some(board) = hand::best_hand(&ctx.community_cards) {
            // the hand only plays the board
            if board >= eval.high {
                score *= 0.5;
            }
        }
    }
    score += draw_potential(&ctx.hole_cards, &ctx.community_cards, ctx.phase);
    if let Some(low) = eval.low {
        score += if low.ranks[0] <= 5 { 0.25 } else { 0.15 };
    }
    score.clamp(0.0, 1.0)
}

fn category_score(category: Category) -> f64 {
    match category {
        Category::HighCard => 0.1,
        Category::OnePair => 0.3,
        Category::TwoPair => 0.5,
        Category::ThreeOfAKind => 0.6,
        Category::Straight => 0.7,
        Category::Flush => 0.8,
        Category::FullHouse => 0.9,
        Category::FourOfAKind | Category::StraightFlush => 1.0,
    }
}

/// Best two-card rating of the hole cards, scaled to `[0, 1]`.
pub fn preflop_strength(hole: &[Card]) -> f64 {
    let mut best = 0u8;
    for (i, a) in hole.iter().enumerate() {
        for b in &hole[i + 1..] {
            best = best.max(two_card_rating(*a, *b));
        }
    }
    f64::from(best) / 10.0
}

/// Rates a two-card starting hand on a 0-10 scale:
/// - 9-10: premium pairs and AKs
/// - 7-8: strong pairs and big aces
/// - 5-6: medium pairs, suited broadway, good suited connectors
/// - 3-4: small pairs, weak aces, connected cards
/// - 0-2: everything else
pub fn two_card_rating(c1: Card, c2: Card) -> u8 {
    let r1 = c1.rank.value();
    let r2 = c2.rank.value();
    let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
    let suited = c1.suit == c2.suit;
    let pick = |s: u8, o: u8| if suited { s } else { o };

    if r1 == r2 {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    match (high, low) {
        (14, 13) => pick(10, 8),
        (14, 12) => pick(8, 7),
        (14, 11) => pick(7, 6),
        (14, 10) => pick(6, 5),
        (14, _) => pick(5, 4),
        (13, 12) => pick(7, 6),
        (13, 11) => pick(6, 5),
        (13, 10) => pick(5, 4),
        (12, 11) => pick(6, 5),
        (12, 10) => pick(5, 4),
        _ => {
            if suited && high - low <= 2 {
                if high >= 9 { 5 } else { 4 }
            } else if high >= 11 && low >= 9 {
                4
            } else {
                2
            }
        }
    }
}

/// Bonus for hole cards that can make a low: two distinct low ranks, more
/// with an Ace among them.
fn low_potential(hole: &[Card], max_rank: u8) -> f64 {
    let mut lows: Vec<u8> = hole
        .iter()
        .map(|c| c.rank.low_value())
        .filter(|&v| v <= max_rank)
        .collect();
    lows.sort_unstable();
    lows.dedup();
    match (lows.len(), lows.first().copied()) {
        (n, Some(1)) if n >= 2 => 0.2,
        (n, _) if n >= 2 => 0.1,
        _ => 0.0,
    }
}

/// Bonus for four to a flush or four to a straight using at least one hole
/// card. Worth more with two cards to come.
fn draw_potential(hole: &[Card], board: &[Card], phase: Phase) -> f64 {
    let weight = match phase {
        Phase::Flop => 1.0,
        Phase::Turn => 0.5,
        _ => return 0.0,
    };
    let all: Vec<Card> = hole.iter().chain(board).copied().collect();

    let flush_draw = hole.iter().any(|h| all.iter().filter(|c| c.suit == h.suit).count() == 4);

    let mut ranks: Vec<u8> = all.iter().map(|c| c.rank.value()).collect();
    if ranks.contains(&14) {
        ranks.push(1);
    }
    ranks.sort_unstable();
    ranks.dedup();
    let hole_ranks: Vec<u8> = hole.iter().map(|c| c.rank.value()).collect();
    let straight_draw = (1..=10u8).any(|start| {
        let window = start..start + 5;
        let hits = ranks.iter().filter(|&&r| window.contains(&r)).count();
        let uses_hole = hole_ranks
            .iter()
            .any(|&r| window.contains(&r) || (r == 14 && start == 1));
        hits == 4 && uses_hole
    });

    let mut bonus = 0.0;
    if flush_draw {
        bonus += 0.15;
    }
    if straight_draw {
        bonus += 0.1;
    }
    bonus * weight
}
