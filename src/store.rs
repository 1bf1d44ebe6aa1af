//! Pokedex store: which Pokemon are visible and where the next page comes from.
//!
//! The store runs in one of two modes. Unfiltered, the list grows by following
//! `next_url` through the remote collection. Filtered, the membership lists of
//! the selected types are fetched once and the list grows by slicing
//! `filtered_pokemon` from `filter_index`.
//!
//! Every change of context (type toggle, reset, initial fetch) bumps
//! `generation`. Results carry the generation they were requested under and
//! are dropped when it no longer matches.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::state::{LoadPhase, PokemonDetails, PokemonSummary};

pub const MAX_SELECTED_TYPES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Unfiltered,
    Filtered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A third type was requested; nothing changed.
    Rejected,
    /// The last type was removed.
    Cleared,
    /// The selection changed and is still non-empty.
    Changed,
}

/// Work needed to grow the list by one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRequest {
    Url {
        generation: u64,
        url: String,
    },
    Slice {
        generation: u64,
        start: usize,
        entries: Vec<PokemonSummary>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokedexState {
    pub pokemon_list: Vec<PokemonDetails>,
    pub filtered_pokemon: Vec<PokemonSummary>,
    pub selected_types: Vec<String>,
    pub next_url: Option<String>,
    pub filter_index: usize,
    pub loading: bool,
    pub is_loading_more: bool,
    pub generation: u64,
}

impl PokedexState {
    pub fn new(first_page_url: String) -> Self {
        Self {
            pokemon_list: Vec::new(),
            filtered_pokemon: Vec::new(),
            selected_types: Vec::new(),
            next_url: Some(first_page_url),
            filter_index: 0,
            loading: false,
            is_loading_more: false,
            generation: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.selected_types.is_empty() {
            Mode::Unfiltered
        } else {
            Mode::Filtered
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Adds or removes `tag` from the selection. Only `selected_types` changes.
    pub fn toggle_type(&mut self, tag: &str) -> ToggleOutcome {
        if let Some(position) = self.selected_types.iter().position(|t| t == tag) {
            self.selected_types.remove(position);
            if self.selected_types.is_empty() {
                return ToggleOutcome::Cleared;
            }
            return ToggleOutcome::Changed;
        }
        if self.selected_types.len() >= MAX_SELECTED_TYPES {
            return ToggleOutcome::Rejected;
        }
        self.selected_types.push(tag.to_string());
        ToggleOutcome::Changed
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Starts a fetch of the unfiltered first page. The current list stays
    /// visible until the page arrives.
    pub fn begin_initial_fetch(&mut self) -> u64 {
        self.loading = true;
        self.is_loading_more = false;
        self.next_generation()
    }

    /// Drops all filter state and rewinds to the first unfiltered page.
    pub fn reset_filters(&mut self, first_page_url: String) -> u64 {
        self.selected_types.clear();
        self.filtered_pokemon.clear();
        self.pokemon_list.clear();
        self.filter_index = 0;
        self.next_url = Some(first_page_url);
        self.begin_initial_fetch()
    }

    /// Starts a full filtered refetch for the current selection.
    pub fn begin_filtered_fetch(&mut self) -> u64 {
        self.filtered_pokemon.clear();
        self.pokemon_list.clear();
        self.filter_index = 0;
        self.loading = true;
        self.is_loading_more = false;
        self.next_generation()
    }

    /// Claims the in-flight token for the next page. Returns `None` without
    /// touching state when a load is running or nothing is left.
    pub fn next_page_request(&mut self, page_size: usize) -> Option<PageRequest> {
        if self.loading || self.is_loading_more {
            return None;
        }
        let request = match self.mode() {
            Mode::Filtered => {
                let entries = self.filtered_slice(self.filter_index, page_size);
                if entries.is_empty() {
                    return None;
                }
                PageRequest::Slice {
                    generation: self.generation,
                    start: self.filter_index,
                    entries,
                }
            }
            Mode::Unfiltered => PageRequest::Url {
                generation: self.generation,
                url: self.next_url.clone()?,
            },
        };
        self.is_loading_more = true;
        Some(request)
    }

    pub fn filtered_slice(&self, start: usize, len: usize) -> Vec<PokemonSummary> {
        self.filtered_pokemon
            .iter()
            .skip(start)
            .take(len)
            .cloned()
            .collect()
    }

    /// Merges an unfiltered page and advances the cursor.
    pub fn apply_page(
        &mut self,
        phase: LoadPhase,
        details: Vec<PokemonDetails>,
        next: Option<String>,
    ) {
        self.merge(phase, details);
        self.next_url = next;
    }

    /// Stores the membership intersection and returns the first slice to fetch.
    pub fn apply_memberships(
        &mut self,
        memberships: Vec<Vec<PokemonSummary>>,
        page_size: usize,
    ) -> Vec<PokemonSummary> {
        self.filtered_pokemon = intersect_memberships(memberships);
        self.filter_index = 0;
        self.filtered_slice(0, page_size)
    }

    /// Merges a filtered slice; `consumed` is how many entries of
    /// `filtered_pokemon` the slice covered, failures included.
    pub fn apply_filtered_slice(
        &mut self,
        phase: LoadPhase,
        start: usize,
        consumed: usize,
        details: Vec<PokemonDetails>,
    ) {
        self.merge(phase, details);
        let advanced = start.saturating_add(consumed).min(self.filtered_pokemon.len());
        self.filter_index = self.filter_index.max(advanced);
    }

    /// Releases the loading flag of a failed phase; the list is left alone.
    pub fn release(&mut self, phase: LoadPhase) {
        match phase {
            LoadPhase::Initial => self.loading = false,
            LoadPhase::More => self.is_loading_more = false,
        }
    }

    fn merge(&mut self, phase: LoadPhase, details: Vec<PokemonDetails>) {
        match phase {
            LoadPhase::Initial => self.pokemon_list = details,
            LoadPhase::More => self.pokemon_list.extend(details),
        }
        self.release(phase);
    }
}

/// Entries of the first list whose names appear in every other list, in the
/// first list's order.
pub fn intersect_memberships(memberships: Vec<Vec<PokemonSummary>>) -> Vec<PokemonSummary> {
    let mut lists = memberships.into_iter();
    let Some(first) = lists.next() else {
        return Vec::new();
    };
    let others: Vec<HashSet<String>> = lists
        .map(|list| list.into_iter().map(|entry| entry.name).collect())
        .collect();
    first
        .into_iter()
        .filter(|entry| others.iter().all(|names| names.contains(&entry.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIRST: &str = "https://pokeapi.co/api/v2/pokemon?limit=20";

    fn summary(name: &str) -> PokemonSummary {
        PokemonSummary {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{name}/"),
        }
    }

    fn summaries(names: &[&str]) -> Vec<PokemonSummary> {
        names.iter().map(|name| summary(name)).collect()
    }

    fn names(entries: &[PokemonSummary]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn third_type_is_rejected() {
        let mut dex = PokedexState::new(FIRST.to_string());
        assert_eq!(dex.toggle_type("fire"), ToggleOutcome::Changed);
        assert_eq!(dex.toggle_type("flying"), ToggleOutcome::Changed);
        assert_eq!(dex.toggle_type("water"), ToggleOutcome::Rejected);
        assert_eq!(dex.selected_types, vec!["fire", "flying"]);
    }

    #[test]
    fn removing_last_type_reports_cleared() {
        let mut dex = PokedexState::new(FIRST.to_string());
        dex.toggle_type("fire");
        dex.toggle_type("flying");
        assert_eq!(dex.toggle_type("fire"), ToggleOutcome::Changed);
        assert_eq!(dex.selected_types, vec!["flying"]);
        assert_eq!(dex.toggle_type("flying"), ToggleOutcome::Cleared);
        assert_eq!(dex.mode(), Mode::Unfiltered);
    }

    #[test]
    fn intersection_keeps_first_list_order() {
        let a = summaries(&["a", "b", "c"]);
        let b = summaries(&["d", "c", "b"]);
        let result = intersect_memberships(vec![a, b]);
        assert_eq!(names(&result), vec!["b", "c"]);
    }

    #[test]
    fn single_membership_is_passed_through() {
        let a = summaries(&["a", "b"]);
        assert_eq!(intersect_memberships(vec![a.clone()]), a);
        assert!(intersect_memberships(Vec::new()).is_empty());
    }

    #[test]
    fn next_page_is_guarded_while_in_flight() {
        let mut dex = PokedexState::new(FIRST.to_string());
        let first = dex.next_page_request(20);
        assert!(matches!(first, Some(PageRequest::Url { .. })));
        assert!(dex.is_loading_more);
        assert_eq!(dex.next_page_request(20), None);
    }

    #[test]
    fn exhausted_unfiltered_request_leaves_state_untouched() {
        let mut dex = PokedexState::new(FIRST.to_string());
        dex.next_url = None;
        let before = dex.clone();
        assert_eq!(dex.next_page_request(20), None);
        assert_eq!(dex, before);
    }

    #[test]
    fn filtered_slices_advance_by_consumed_length() {
        let mut dex = PokedexState::new(FIRST.to_string());
        dex.toggle_type("fire");
        let generation = dex.begin_filtered_fetch();
        let first = dex.apply_memberships(vec![summaries(&["a", "b", "c", "d", "e"])], 2);
        assert_eq!(names(&first), vec!["a", "b"]);
        dex.apply_filtered_slice(LoadPhase::Initial, 0, first.len(), Vec::new());
        assert_eq!(dex.filter_index, 2);
        assert!(!dex.loading);

        let Some(PageRequest::Slice {
            generation: tagged,
            start,
            entries,
        }) = dex.next_page_request(2)
        else {
            panic!("expected a filtered slice");
        };
        assert_eq!(tagged, generation);
        assert_eq!(start, 2);
        assert_eq!(names(&entries), vec!["c", "d"]);
        dex.apply_filtered_slice(LoadPhase::More, start, entries.len(), Vec::new());
        assert_eq!(dex.filter_index, 4);

        let Some(PageRequest::Slice { start, entries, .. }) = dex.next_page_request(2) else {
            panic!("expected the last slice");
        };
        dex.apply_filtered_slice(LoadPhase::More, start, entries.len(), Vec::new());
        assert_eq!(dex.filter_index, 5);

        let before = dex.clone();
        assert_eq!(dex.next_page_request(2), None);
        assert_eq!(dex, before);
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let mut once = PokedexState::new(FIRST.to_string());
        once.toggle_type("fire");
        once.begin_filtered_fetch();
        once.apply_memberships(vec![summaries(&["a", "b"])], 20);
        let mut twice = once.clone();

        once.reset_filters(FIRST.to_string());
        twice.reset_filters(FIRST.to_string());
        twice.reset_filters(FIRST.to_string());

        assert_eq!(twice.selected_types, once.selected_types);
        assert_eq!(twice.filtered_pokemon, once.filtered_pokemon);
        assert_eq!(twice.pokemon_list, once.pokemon_list);
        assert_eq!(twice.next_url, once.next_url);
        assert_eq!(twice.filter_index, once.filter_index);
        assert_eq!(twice.loading, once.loading);
    }

    #[test]
    fn release_clears_only_the_failed_phase() {
        let mut dex = PokedexState::new(FIRST.to_string());
        dex.loading = true;
        dex.is_loading_more = true;
        dex.release(LoadPhase::More);
        assert!(dex.loading);
        assert!(!dex.is_loading_more);
    }
}
