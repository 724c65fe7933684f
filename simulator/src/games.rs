//! Settlement rules for the two lobby games.
//!
//! Slots paytable (gross win, bet included):
//! - triple 💎 pays 10x, triple 7️⃣ pays 7x, any other triple 5x
//! - an adjacent pair (left or right) pays 2x
//!
//! Roulette: the wheel lands on 0-36; zero is green, odd numbers are
//! red and even numbers are black (the house's rule, not the physical
//! wheel layout). A matching color choice pays 2x, or 35x for green.

use rand::Rng;
use royale_types::Color;

pub(crate) const SLOT_SYMBOLS: [&str; 6] = ["🍒", "🍋", "🍊", "💎", "7️⃣", "⭐"];

/// Draw three independent reel symbols.
pub(crate) fn spin_reels(rng: &mut impl Rng) -> [&'static str; 3] {
    let mut reels = [""; 3];
    for reel in reels.iter_mut() {
        *reel = SLOT_SYMBOLS[rng.gen_range(0..SLOT_SYMBOLS.len())];
    }
    reels
}

/// Gross win for a slots spin. `None` when the payout would not fit
/// in a `u64`.
pub(crate) fn slots_win(reels: &[&str; 3], bet: u64) -> Option<u64> {
    if reels[0] == reels[1] && reels[1] == reels[2] {
        let multiplier = match reels[0] {
            "💎" => 10,
            "7️⃣" => 7,
            _ => 5,
        };
        bet.checked_mul(multiplier)
    } else if reels[0] == reels[1] || reels[1] == reels[2] {
        bet.checked_mul(2)
    } else {
        Some(0)
    }
}

/// Draw a wheel number in 0-36.
pub(crate) fn spin_wheel(rng: &mut impl Rng) -> u8 {
    rng.gen_range(0..=36)
}

pub(crate) fn wheel_color(number: u8) -> Color {
    if number == 0 {
        Color::Green
    } else if number % 2 == 1 {
        Color::Red
    } else {
        Color::Black
    }
}

/// Gross win for a roulette spin given the player's color choice.
/// `None` when the payout would not fit in a `u64`.
pub(crate) fn roulette_win(choice: Color, number: u8, bet: u64) -> Option<u64> {
    let color = wheel_color(number);
    if choice != color {
        Some(0)
    } else if color == Color::Green {
        bet.checked_mul(35)
    } else {
        bet.checked_mul(2)
    }
}
