//! Main pot and side pot construction.
//!
//! Pots are layered by contribution level: every distinct total that some
//! player put into the hand closes a tier, and a tier is won only by players
//! still in the hand who matched it. Folded chips stay in the tiers they
//! reached.

/// One pot tier and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: u32,
    /// Seats still in the hand that contributed at least this tier's level
    pub eligible: Vec<usize>,
}

/// A seat's total chips put into the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    /// False once the player has folded
    pub in_hand: bool,
}

/// Builds pots from the lowest tier (the main pot) upwards.
///
/// Adjacent tiers with the same eligible seats are merged, so equal all-in
/// stacks never produce an empty or duplicate side pot. A tier nobody left in
/// the hand can win folds into the tier below it.
pub fn build_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|&a| a > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut carry = 0u32;
    let mut prev = 0u32;
    for level in levels {
        let amount: u32 = contributions
            .iter()
            .map(|c| c.amount.min(level).saturating_sub(prev))
            .sum();
        let mut eligible: Vec<usize> = contributions
            .iter()
            .filter(|c| c.in_hand && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();
        prev = level;

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => carry += amount,
            }
            continue;
        }
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.amount += amount,
            _ => pots.push(Pot {
                amount: amount + std::mem::take(&mut carry),
                eligible,
            }),
        }
    }
    pots
}

/// Splits `amount` into `n` shares; the first `amount % n` shares get one
/// extra chip.
pub fn split_evenly(amount: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n32 = n as u32;
    let share = amount / n32;
    let remainder = (amount % n32) as usize;
    (0..n)
        .map(|i| if i < remainder { share + 1 } else { share })
        .collect()
}
