use winnow::{
    combinator::{alt, delimited, preceded, separated_foldl1, separated_foldr1},
    error::{StrContext, StrContextValue},
    token::take_while,
    PResult, Parser,
};

use crate::{
    error::ParseError,
    log::targets::CODEC as LOG_CODEC,
    propositional_logic::types::{Proposition, CONTRADICTION},
};

type Input<'a> = &'a str;

/// Drops all whitespace and rewrites the accepted operator aliases to their
/// canonical spelling (`<=>`, `=>`, `~`).
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace("<->", "<=>")
        .replace("->", "=>")
        .replace('¬', "~")
}

pub fn parse_proposition(input: &str) -> Result<Proposition, ParseError> {
    let normalized = normalize(input);

    proposition
        .parse(normalized.as_str())
        .map_err(|e| ParseError {
            input: input.to_owned(),
            reason: e.inner().to_string(),
        })
}

/// Parses `input`, degrading anything outside the grammar to an opaque atom
/// named by its normalized text. A leading `~` that covers the rest of the
/// text is still honoured, so `~(A&&B)` becomes the negation of the atom `A&&B`.
pub fn parse_lenient(input: &str) -> Proposition {
    lenient(&normalize(input))
}

fn lenient(text: &str) -> Proposition {
    match proposition.parse(text) {
        Ok(proposition) => proposition,
        Err(_) => match text.strip_prefix('~') {
            Some(rest) if is_unit(rest) => {
                Proposition::Negation(Box::new(lenient(strip_parentheses(rest))))
            }
            _ => {
                log::debug!(target: LOG_CODEC, "Treating \"{text}\" as an opaque atom.");
                Proposition::atom(text)
            }
        },
    }
}

/// Toggles the negation of a formula on its text.
///
/// `~X` loses its marker when the marker covers all of `X`, atoms gain one,
/// and every other formula is wrapped as `~(…)`, so negating twice gives back
/// the normalized input.
pub fn negate(formula: &str) -> String {
    let formula = normalize(formula);

    match formula.strip_prefix('~') {
        Some(rest) if is_unit(rest) => strip_parentheses(rest).to_owned(),
        _ if is_atom(&formula) => format!("~{formula}"),
        _ => format!("~({formula})"),
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_atom(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_atom_char)
}

// An atom, a negated unit, or exactly one parenthesized group.
fn is_unit(text: &str) -> bool {
    if let Some(rest) = text.strip_prefix('~') {
        return is_unit(rest);
    }

    if text.starts_with('(') {
        return matching_parenthesis(text) == Some(text.len() - 1);
    }

    is_atom(text)
}

fn strip_parentheses(text: &str) -> &str {
    if text.starts_with('(') && matching_parenthesis(text) == Some(text.len() - 1) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

// Byte index of the parenthesis closing the one `text` starts with.
fn matching_parenthesis(text: &str) -> Option<usize> {
    let mut depth = 0usize;

    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }

    None
}

fn proposition(input: &mut Input) -> PResult<Proposition> {
    equivalence.parse_next(input)
}

fn equivalence(input: &mut Input) -> PResult<Proposition> {
    separated_foldr1(implication, "<=>", |left, _, right| {
        Proposition::Equivalence(Box::new(left), Box::new(right))
    })
    .parse_next(input)
}

fn implication(input: &mut Input) -> PResult<Proposition> {
    separated_foldr1(disjunction, "=>", |left, _, right| {
        Proposition::Implication(Box::new(left), Box::new(right))
    })
    .parse_next(input)
}

fn disjunction(input: &mut Input) -> PResult<Proposition> {
    separated_foldl1(conjunction, '|', |left, _, right| {
        Proposition::Disjunction(Box::new(left), Box::new(right))
    })
    .parse_next(input)
}

fn conjunction(input: &mut Input) -> PResult<Proposition> {
    separated_foldl1(base_expression, '&', |left, _, right| {
        Proposition::Conjunction(Box::new(left), Box::new(right))
    })
    .parse_next(input)
}

fn base_expression(input: &mut Input) -> PResult<Proposition> {
    alt((negation, parenthesized_expression, atomic))
        .context(StrContext::Label("base expression"))
        .parse_next(input)
}

fn negation(input: &mut Input) -> PResult<Proposition> {
    preceded('~', base_expression)
        .map(|p| Proposition::Negation(Box::new(p)))
        .parse_next(input)
}

fn parenthesized_expression(input: &mut Input) -> PResult<Proposition> {
    delimited(
        '(',
        proposition,
        ')'.context(StrContext::Expected(StrContextValue::Description(
            "closing parenthesis",
        ))),
    )
    .parse_next(input)
}

fn atomic(input: &mut Input) -> PResult<Proposition> {
    take_while(1.., is_atom_char)
        .map(|name: &str| {
            if name == CONTRADICTION {
                Proposition::Contradiction
            } else {
                Proposition::atom(name)
            }
        })
        .context(StrContext::Expected(StrContextValue::Description(
            "propositional variable",
        )))
        .parse_next(input)
}
