use serde::{Deserialize, Serialize};

use crate::config::NAME_INDEX_LIMIT;
use crate::state::PokemonSummary;

pub const SUGGESTION_LIMIT: usize = 20;

/// Shown when the search box is empty.
pub const POPULAR: [(&str, u32); 12] = [
    ("pikachu", 25),
    ("charizard", 6),
    ("bulbasaur", 1),
    ("squirtle", 7),
    ("eevee", 133),
    ("mewtwo", 150),
    ("gengar", 94),
    ("snorlax", 143),
    ("lucario", 448),
    ("greninja", 658),
    ("rayquaza", 384),
    ("dragonite", 149),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub dex_number: Option<u32>,
}

impl From<&PokemonSummary> for Suggestion {
    fn from(summary: &PokemonSummary) -> Self {
        Suggestion {
            name: summary.name.clone(),
            dex_number: summary.dex_number(),
        }
    }
}

pub fn popular() -> Vec<Suggestion> {
    POPULAR
        .iter()
        .map(|(name, number)| Suggestion {
            name: (*name).to_string(),
            dex_number: Some(*number),
        })
        .collect()
}

/// Suggestions for `term` drawn from the name index.
pub fn suggestions(index: &[PokemonSummary], term: &str) -> Vec<Suggestion> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return popular();
    }

    let mut matches: Vec<Suggestion> = Vec::new();
    if let Some(number) = parse_dex_number(&term) {
        if let Some(entry) = find_by_number(index, number) {
            matches.push(entry.into());
        }
    }

    for entry in index {
        if matches.len() >= SUGGESTION_LIMIT {
            break;
        }
        if entry.name.to_lowercase().contains(&term)
            && !matches.iter().any(|existing| existing.name == entry.name)
        {
            matches.push(entry.into());
        }
    }
    matches
}

fn parse_dex_number(term: &str) -> Option<u32> {
    let number: u32 = term.parse().ok()?;
    (1..=NAME_INDEX_LIMIT as u32)
        .contains(&number)
        .then_some(number)
}

fn find_by_number(index: &[PokemonSummary], number: u32) -> Option<&PokemonSummary> {
    index
        .iter()
        .find(|entry| entry.dex_number() == Some(number))
        .or_else(|| index.get(number as usize - 1))
}
