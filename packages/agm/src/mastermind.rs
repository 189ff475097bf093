//! Boundary helpers for a Mastermind playing agent.
//!
//! A code is a sequence of colors, each a single alphanumeric character. The
//! proposition `p<position><color>` (positions are 1-based) states that the
//! secret holds `color` at `position`.

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    belief::store::{BeliefStore, Expansion},
    error::LimitExceeded,
    explanation::Explain,
    propositional_logic::parser::negate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    /// Right color in the right position.
    pub black: usize,
    /// Right color in the wrong position.
    pub white: usize,
}

impl Feedback {
    pub fn new(black: usize, white: usize) -> Self {
        Self { black, white }
    }

    pub fn score(guess: &[char], code: &[char]) -> Self {
        let black = guess.iter().zip(code).filter(|(g, c)| g == c).count();

        let guess_counts = guess.iter().counts();
        let code_counts = code.iter().counts();
        let common = guess_counts
            .iter()
            .map(|(color, &count)| count.min(code_counts.get(color).copied().unwrap_or(0)))
            .sum::<usize>();

        Self {
            black,
            white: common - black,
        }
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} black, {} white", self.black, self.white)
    }
}

pub fn proposition_name(position: usize, color: char) -> String {
    format!("p{position}{color}")
}

/// Formulas that hold for every secret that would give `feedback` to `guess`.
pub fn encode_feedback(guess: &[char], feedback: Feedback) -> Vec<String> {
    let positions = 1..=guess.len();
    let colors = guess.iter().copied().unique().collect::<Vec<_>>();

    let mut formulas = Vec::new();

    if feedback.black == 0 && feedback.white == 0 {
        for &color in &colors {
            for position in positions.clone() {
                formulas.push(negate(&proposition_name(position, color)));
            }
        }

        return formulas;
    }

    if feedback.black == guess.len() {
        return positions
            .zip(guess)
            .map(|(position, &color)| proposition_name(position, color))
            .collect();
    }

    if feedback.black == 0 {
        formulas.extend(
            positions
                .clone()
                .zip(guess)
                .map(|(position, &color)| negate(&proposition_name(position, color))),
        );

        // Some guessed color sits where the guess did not put it.
        let misplaced = positions
            .cartesian_product(colors.iter().copied())
            .filter(|&(position, color)| guess[position - 1] != color)
            .map(|(position, color)| proposition_name(position, color))
            .join("|");
        if !misplaced.is_empty() {
            formulas.push(misplaced);
        }
    } else {
        formulas.push(
            positions
                .zip(guess)
                .map(|(position, &color)| proposition_name(position, color))
                .join("|"),
        );
    }

    formulas
}

/// Expands `store` with the encoding of one round of feedback.
pub fn record_feedback(
    store: &mut BeliefStore,
    guess: &[char],
    feedback: Feedback,
    explanation: &mut impl Explain,
) -> Result<Vec<Expansion>, LimitExceeded> {
    explanation.with_subexplanation(
        || format!("Recording {} for {}", feedback, guess.iter().collect::<String>()),
        |explanation| {
            encode_feedback(guess, feedback)
                .iter()
                .map(|formula| store.expand_default(formula, explanation))
                .collect()
        },
    )
}

/// Whether `candidate` could still be the secret, that is whether the store
/// does not entail that the candidate is wrong.
pub fn consistent_with(
    store: &BeliefStore,
    candidate: &[char],
    explanation: &mut impl Explain,
) -> Result<bool, LimitExceeded> {
    let conjunction = candidate
        .iter()
        .enumerate()
        .map(|(i, &color)| proposition_name(i + 1, color))
        .join("&");

    if conjunction.is_empty() {
        return Ok(true);
    }

    Ok(!store.entails(&negate(&conjunction), explanation)?)
}
