use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::ApiError;
use crate::effect::Effect;
use crate::state::{AppState, DetailFailure, DetailView, FocusArea, LoadPhase, PokemonProfile};
use crate::store::{PageRequest, ToggleOutcome, MAX_SELECTED_TYPES};
use crate::type_style;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.message = None;
            state.name_index_loading = true;
            // A restored snapshot may already carry selected types.
            DispatchResult::changed_with_many(vec![
                refetch(state),
                Effect::LoadNameIndex {
                    url: state.config.name_index_url(),
                },
            ])
        }

        Action::PageFetchInitial => DispatchResult::changed_with(refetch(state)),

        Action::PageFetchNext => match next_page_effect(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::PageDidLoad {
            generation,
            phase,
            page,
        } => {
            if !state.dex.is_current(generation) {
                tracing::debug!(generation, current = state.dex.generation, "stale page dropped");
                return DispatchResult::unchanged();
            }
            tracing::debug!(
                ?phase,
                loaded = page.batch.details.len(),
                next = ?page.next,
                "page merged"
            );
            state.dex.apply_page(phase, page.batch.details, page.next);
            after_merge(state, phase, &page.batch.failures);
            DispatchResult::changed()
        }

        Action::PageDidError {
            generation,
            phase,
            error,
        } => {
            if !state.dex.is_current(generation) {
                tracing::debug!(generation, "stale page error dropped");
                return DispatchResult::unchanged();
            }
            tracing::warn!(?phase, %error, "page load failed");
            state.dex.release(phase);
            state.message = Some(format!("Failed to load Pokemon: {error}"));
            DispatchResult::changed()
        }

        Action::FilterToggle(tag) => toggle_filter(state, &tag),

        Action::FilterToggleCursor => {
            let Some(style) = type_style::all().get(state.type_cursor) else {
                return DispatchResult::unchanged();
            };
            toggle_filter(state, style.tag)
        }

        Action::FilterCursorMove(delta) => {
            let len = type_style::all().len() as i64;
            let next = (state.type_cursor as i64 + i64::from(delta)).rem_euclid(len) as usize;
            if next == state.type_cursor {
                return DispatchResult::unchanged();
            }
            state.type_cursor = next;
            DispatchResult::changed()
        }

        Action::FilterReset => {
            let generation = state.dex.reset_filters(state.config.first_page_url());
            tracing::debug!(generation, "filters reset");
            state.selected_index = 0;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadPage {
                generation,
                phase: LoadPhase::Initial,
                url: state.config.first_page_url(),
            })
        }

        Action::FilterMembersDidLoad {
            generation,
            memberships,
        } => {
            if !state.dex.is_current(generation) {
                tracing::debug!(generation, "stale type members dropped");
                return DispatchResult::unchanged();
            }
            let entries = state
                .dex
                .apply_memberships(memberships, state.config.page_size);
            tracing::debug!(
                types = ?state.dex.selected_types,
                matched = state.dex.filtered_pokemon.len(),
                "type members intersected"
            );
            if entries.is_empty() {
                state.dex.release(LoadPhase::Initial);
                state.message = Some("No Pokemon match the selected types".to_string());
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(Effect::LoadFilteredSlice {
                generation,
                phase: LoadPhase::Initial,
                start: 0,
                entries,
            })
        }

        Action::FilterMembersDidError { generation, error } => {
            if !state.dex.is_current(generation) {
                tracing::debug!(generation, "stale type members error dropped");
                return DispatchResult::unchanged();
            }
            tracing::warn!(%error, "type members failed");
            state.dex.release(LoadPhase::Initial);
            state.message = Some(format!("Failed to load type filter: {error}"));
            DispatchResult::changed()
        }

        Action::FilterSliceDidLoad {
            generation,
            phase,
            start,
            consumed,
            batch,
        } => {
            if !state.dex.is_current(generation) {
                tracing::debug!(generation, "stale filtered slice dropped");
                return DispatchResult::unchanged();
            }
            state
                .dex
                .apply_filtered_slice(phase, start, consumed, batch.details);
            tracing::debug!(
                ?phase,
                filter_index = state.dex.filter_index,
                total = state.dex.filtered_pokemon.len(),
                "filtered slice merged"
            );
            after_merge(state, phase, &batch.failures);
            DispatchResult::changed()
        }

        Action::NameIndexDidLoad(entries) => {
            state.name_index = entries;
            state.name_index_loading = false;
            DispatchResult::changed()
        }

        Action::NameIndexDidError(error) => {
            tracing::warn!(%error, "name index failed");
            state.name_index_loading = false;
            state.message = Some(format!("Search index unavailable: {error}"));
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let len = state.dex.pokemon_list.len();
            let index = clamp_index(state.selected_index, len, delta);
            let moved = state.set_selected_index(index);
            after_selection(state, moved)
        }

        Action::SelectionJumpTop => {
            let moved = state.set_selected_index(0);
            after_selection(state, moved)
        }

        Action::SelectionJumpBottom => {
            let last = state.dex.pokemon_list.len().saturating_sub(1);
            let moved = state.set_selected_index(last);
            after_selection(state, moved)
        }

        Action::DexSelect(index) => {
            let moved = state.set_selected_index(index);
            after_selection(state, moved)
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.search.selected = 0;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.search.selected = 0;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.search.selected = 0;
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.search.selected = 0;
            DispatchResult::changed()
        }

        Action::SearchSuggestionMove(delta) => {
            let len = state.suggestions().len();
            let next = clamp_index(state.search.selected, len, delta);
            if next == state.search.selected {
                return DispatchResult::unchanged();
            }
            state.search.selected = next;
            DispatchResult::changed()
        }

        Action::SearchSuggestionSelect(index) => {
            let len = state.suggestions().len();
            let next = index.min(len.saturating_sub(1));
            if next == state.search.selected {
                return DispatchResult::unchanged();
            }
            state.search.selected = next;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let target = state
                .suggestions()
                .into_iter()
                .nth(state.search.selected)
                .map(|suggestion| suggestion.name)
                .or_else(|| {
                    let query = state.search.query.trim().to_lowercase();
                    (!query.is_empty()).then_some(query)
                });
            state.search.active = false;
            state.search.query.clear();
            state.search.selected = 0;
            match target {
                Some(name) => open_detail(state, name),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailOpen(name) => open_detail(state, name),

        Action::DetailOpenSelected => {
            let Some(name) = state.selected_pokemon().map(|details| details.name.clone()) else {
                return DispatchResult::unchanged();
            };
            open_detail(state, name)
        }

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            state.focus = FocusArea::DexList;
            DispatchResult::changed()
        }

        Action::ProfileDidLoad(profile) => {
            let Some(view) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if !profile_matches(&view.name, &profile) {
                tracing::debug!(
                    open = %view.name,
                    loaded = %profile.details.name,
                    "stale profile dropped"
                );
                return DispatchResult::unchanged();
            }
            view.profile = DataResource::Loaded(profile);
            DispatchResult::changed()
        }

        Action::ProfileDidError { name, error } => {
            let Some(view) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if view.name != name {
                return DispatchResult::unchanged();
            }
            tracing::warn!(%name, %error, "profile failed");
            view.profile = DataResource::Failed(profile_error_message(&name, &error));
            DispatchResult::changed()
        }

        Action::FocusNext => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.focus_next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.focus_prev();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            let profile_loading = state
                .detail
                .as_ref()
                .is_some_and(|view| view.profile.is_loading());
            if state.dex.loading || state.dex.is_loading_more || profile_loading {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn toggle_filter(state: &mut AppState, tag: &str) -> DispatchResult<Effect> {
    let selected = state.dex.selected_types.iter().any(|t| t == tag);
    if !selected && !type_style::is_known(tag) {
        tracing::debug!(tag, "unknown type rejected");
        state.message = Some(format!("Unknown type \"{tag}\""));
        return DispatchResult::changed();
    }
    match state.dex.toggle_type(tag) {
        ToggleOutcome::Rejected => {
            tracing::debug!(tag, "third type rejected");
            state.message = Some(format!(
                "At most {MAX_SELECTED_TYPES} types can be combined; deselect one first"
            ));
            DispatchResult::changed()
        }
        ToggleOutcome::Cleared => {
            let generation = state.dex.reset_filters(state.config.first_page_url());
            tracing::debug!(generation, "last type removed");
            state.selected_index = 0;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadPage {
                generation,
                phase: LoadPhase::Initial,
                url: state.config.first_page_url(),
            })
        }
        ToggleOutcome::Changed => {
            state.selected_index = 0;
            state.message = None;
            DispatchResult::changed_with(filtered_fetch(state))
        }
    }
}

fn filtered_fetch(state: &mut AppState) -> Effect {
    let generation = state.dex.begin_filtered_fetch();
    tracing::debug!(generation, types = ?state.dex.selected_types, "filtered fetch");
    Effect::LoadTypeMembers {
        generation,
        types: state.dex.selected_types.clone(),
    }
}

/// Reloads page one of whatever mode is active.
fn refetch(state: &mut AppState) -> Effect {
    state.selected_index = 0;
    if !state.dex.selected_types.is_empty() {
        return filtered_fetch(state);
    }
    let generation = state.dex.begin_initial_fetch();
    tracing::debug!(generation, "initial fetch");
    Effect::LoadPage {
        generation,
        phase: LoadPhase::Initial,
        url: state.config.first_page_url(),
    }
}

fn next_page_effect(state: &mut AppState) -> Option<Effect> {
    let request = state.dex.next_page_request(state.config.page_size)?;
    tracing::debug!(?request, "next page");
    Some(match request {
        PageRequest::Url { generation, url } => Effect::LoadPage {
            generation,
            phase: LoadPhase::More,
            url,
        },
        PageRequest::Slice {
            generation,
            start,
            entries,
        } => Effect::LoadFilteredSlice {
            generation,
            phase: LoadPhase::More,
            start,
            entries,
        },
    })
}

fn after_selection(state: &mut AppState, moved: bool) -> DispatchResult<Effect> {
    let effect = if state.near_list_end() {
        next_page_effect(state)
    } else {
        None
    };
    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None if moved => DispatchResult::changed(),
        None => DispatchResult::unchanged(),
    }
}

fn after_merge(state: &mut AppState, phase: LoadPhase, failures: &[DetailFailure]) {
    if phase == LoadPhase::Initial {
        state.selected_index = 0;
    } else {
        let len = state.dex.pokemon_list.len();
        state.selected_index = state.selected_index.min(len.saturating_sub(1));
    }
    if failures.is_empty() {
        if phase == LoadPhase::Initial {
            state.message = None;
        }
        return;
    }
    let names: Vec<&str> = failures.iter().map(|failure| failure.name.as_str()).collect();
    tracing::warn!(failed = ?names, "some Pokemon could not be loaded");
    state.message = Some(format!(
        "{} Pokemon failed to load: {}",
        failures.len(),
        names.join(", ")
    ));
}

fn open_detail(state: &mut AppState, name: String) -> DispatchResult<Effect> {
    state.focus = FocusArea::Detail;
    if let Some(view) = state.detail.as_ref() {
        if view.name == name && !matches!(view.profile, DataResource::Failed(_)) {
            return DispatchResult::changed();
        }
    }
    state.detail = Some(DetailView {
        name: name.clone(),
        profile: DataResource::Loading,
    });
    DispatchResult::changed_with(Effect::LoadProfile { name })
}

fn profile_matches(requested: &str, profile: &PokemonProfile) -> bool {
    requested == profile.details.name
        || requested == profile.species.name
        || requested == profile.details.id.to_string()
}

fn profile_error_message(name: &str, error: &ApiError) -> String {
    if error.is_not_found() {
        format!("No Pokemon named \"{name}\"")
    } else {
        error.to_string()
    }
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + i64::from(delta);
    next.clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DetailBatch, DetailPage, PokemonDetails, PokemonSprites, PokemonSummary};

    fn details(id: u32, name: &str) -> PokemonDetails {
        PokemonDetails {
            id,
            name: name.to_string(),
            sprites: PokemonSprites::default(),
            types: vec!["normal".to_string()],
            height: 1,
            weight: 1,
            stats: Vec::new(),
            moves: Vec::new(),
            base_experience: None,
            abilities: Vec::new(),
        }
    }

    fn summary(id: u32, name: &str) -> PokemonSummary {
        PokemonSummary {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
        }
    }

    fn loaded_state(count: u32) -> AppState {
        let mut state = AppState::default();
        state.dex.pokemon_list = (1..=count).map(|id| details(id, &format!("mon-{id}"))).collect();
        state.dex.next_url = Some("https://pokeapi.co/api/v2/pokemon?offset=20&limit=20".into());
        state
    }

    #[test]
    fn test_init_requests_first_page_and_name_index() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.dex.loading);
        assert!(state.name_index_loading);
        assert_eq!(result.effects.len(), 2);
        assert_eq!(
            result.effects[0],
            Effect::LoadPage {
                generation: 1,
                phase: LoadPhase::Initial,
                url: "https://pokeapi.co/api/v2/pokemon?limit=20".to_string(),
            }
        );
        assert!(matches!(result.effects[1], Effect::LoadNameIndex { .. }));
    }

    #[test]
    fn test_page_did_load_replaces_list_and_cursor() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        let page = DetailPage {
            batch: DetailBatch {
                details: vec![details(1, "bulbasaur"), details(2, "ivysaur")],
                failures: Vec::new(),
            },
            next: Some("next-url".to_string()),
        };

        let result = reducer(
            &mut state,
            Action::PageDidLoad {
                generation: 1,
                phase: LoadPhase::Initial,
                page,
            },
        );

        assert!(result.changed);
        assert!(!state.dex.loading);
        assert_eq!(state.dex.pokemon_list.len(), 2);
        assert_eq!(state.dex.next_url.as_deref(), Some("next-url"));
    }

    #[test]
    fn test_stale_page_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(&mut state, Action::FilterToggle("fire".into()));

        let result = reducer(
            &mut state,
            Action::PageDidLoad {
                generation: 1,
                phase: LoadPhase::Initial,
                page: DetailPage {
                    batch: DetailBatch {
                        details: vec![details(1, "bulbasaur")],
                        failures: Vec::new(),
                    },
                    next: None,
                },
            },
        );

        assert!(!result.changed);
        assert!(state.dex.pokemon_list.is_empty());
        assert!(state.dex.loading);
    }

    #[test]
    fn test_page_error_releases_flag_and_keeps_list() {
        let mut state = loaded_state(3);
        let result = reducer(&mut state, Action::PageFetchNext);
        assert_eq!(result.effects.len(), 1);
        assert!(state.dex.is_loading_more);

        let generation = state.dex.generation;
        let result = reducer(
            &mut state,
            Action::PageDidError {
                generation,
                phase: LoadPhase::More,
                error: ApiError::Request("offline".into()),
            },
        );

        assert!(result.changed);
        assert!(!state.dex.is_loading_more);
        assert_eq!(state.dex.pokemon_list.len(), 3);
        assert!(state.message.as_deref().unwrap_or("").contains("offline"));
    }

    #[test]
    fn test_fetch_next_while_in_flight_emits_nothing() {
        let mut state = loaded_state(3);
        let first = reducer(&mut state, Action::PageFetchNext);
        assert!(matches!(
            first.effects.as_slice(),
            [Effect::LoadPage {
                phase: LoadPhase::More,
                ..
            }]
        ));

        let second = reducer(&mut state, Action::PageFetchNext);
        assert!(!second.changed);
        assert!(second.effects.is_empty());
    }

    #[test]
    fn test_partial_failures_keep_page_and_warn() {
        let mut state = loaded_state(2);
        reducer(&mut state, Action::PageFetchNext);

        let generation = state.dex.generation;
        reducer(
            &mut state,
            Action::PageDidLoad {
                generation,
                phase: LoadPhase::More,
                page: DetailPage {
                    batch: DetailBatch {
                        details: vec![details(3, "mon-3")],
                        failures: vec![DetailFailure {
                            name: "mon-4".into(),
                            error: ApiError::Status {
                                url: "u".into(),
                                status: 500,
                            },
                        }],
                    },
                    next: None,
                },
            },
        );

        assert_eq!(state.dex.pokemon_list.len(), 3);
        assert_eq!(state.dex.next_url, None);
        assert_eq!(
            state.message.as_deref(),
            Some("1 Pokemon failed to load: mon-4")
        );
    }

    #[test]
    fn test_third_type_shows_hint() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterToggle("fire".into()));
        reducer(&mut state, Action::FilterToggle("flying".into()));
        let generation = state.dex.generation;

        let result = reducer(&mut state, Action::FilterToggle("water".into()));

        assert!(result.effects.is_empty());
        assert_eq!(state.dex.selected_types, vec!["fire", "flying"]);
        assert_eq!(state.dex.generation, generation);
        assert!(state.message.is_some());
    }

    #[test]
    fn test_toggle_emits_type_members_for_all_selected() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterToggle("fire".into()));
        let result = reducer(&mut state, Action::FilterToggle("flying".into()));

        assert_eq!(
            result.effects,
            vec![Effect::LoadTypeMembers {
                generation: state.dex.generation,
                types: vec!["fire".to_string(), "flying".to_string()],
            }]
        );
        assert_eq!(state.dex.filter_index, 0);
        assert!(state.dex.pokemon_list.is_empty());
    }

    #[test]
    fn test_members_loaded_requests_first_slice() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterToggle("fire".into()));
        let generation = state.dex.generation;

        let result = reducer(
            &mut state,
            Action::FilterMembersDidLoad {
                generation,
                memberships: vec![vec![summary(4, "charmander"), summary(5, "charmeleon")]],
            },
        );

        let [Effect::LoadFilteredSlice { start, entries, .. }] = result.effects.as_slice() else {
            panic!("expected a filtered slice effect");
        };
        assert_eq!(*start, 0);
        assert_eq!(entries.len(), 2);
        assert!(state.dex.loading);
    }

    #[test]
    fn test_empty_intersection_releases_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterToggle("fire".into()));
        let generation = state.dex.generation;

        let result = reducer(
            &mut state,
            Action::FilterMembersDidLoad {
                generation,
                memberships: vec![vec![summary(4, "charmander")], vec![summary(7, "squirtle")]],
            },
        );

        assert!(result.effects.is_empty());
        assert!(!state.dex.loading);
        assert!(state.dex.filtered_pokemon.is_empty());
    }

    #[test]
    fn test_clearing_last_type_returns_to_first_page() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterToggle("fire".into()));
        let result = reducer(&mut state, Action::FilterToggle("fire".into()));

        assert!(state.dex.selected_types.is_empty());
        assert_eq!(
            state.dex.next_url.as_deref(),
            Some("https://pokeapi.co/api/v2/pokemon?limit=20")
        );
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadPage {
                phase: LoadPhase::Initial,
                ..
            }]
        ));
    }

    #[test]
    fn test_selection_near_end_requests_next_page() {
        let mut state = loaded_state(10);
        state.selected_index = 2;

        let result = reducer(&mut state, Action::SelectionMove(1));
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::DexSelect(4));
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadPage {
                phase: LoadPhase::More,
                ..
            }]
        ));
        assert!(state.dex.is_loading_more);
    }

    #[test]
    fn test_filter_cursor_wraps() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterCursorMove(-1));
        assert_eq!(state.type_cursor, 17);
        reducer(&mut state, Action::FilterCursorMove(1));
        assert_eq!(state.type_cursor, 0);

        reducer(&mut state, Action::FilterToggleCursor);
        assert_eq!(state.dex.selected_types, vec!["fire"]);
    }

    #[test]
    fn test_filter_cursor_survives_extreme_deltas() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FilterCursorMove(i16::MAX));
        assert_eq!(state.type_cursor, 7);

        state.type_cursor = 17;
        reducer(&mut state, Action::FilterCursorMove(i16::MIN));
        assert_eq!(state.type_cursor, 9);
    }

    #[test]
    fn test_unknown_type_is_rejected_with_hint() {
        let mut state = AppState::default();
        let generation = state.dex.generation;

        let result = reducer(&mut state, Action::FilterToggle("shadow".into()));

        assert!(result.effects.is_empty());
        assert!(state.dex.selected_types.is_empty());
        assert_eq!(state.dex.generation, generation);
        assert_eq!(state.message.as_deref(), Some("Unknown type \"shadow\""));
    }

    #[test]
    fn test_init_with_selected_types_refetches_filtered_view() {
        let mut state = AppState::default();
        state.dex.selected_types = vec!["fire".to_string()];

        let result = reducer(&mut state, Action::Init);

        assert_eq!(result.effects.len(), 2);
        assert!(matches!(
            &result.effects[0],
            Effect::LoadTypeMembers { types, .. } if types == &vec!["fire".to_string()]
        ));
        assert!(matches!(result.effects[1], Effect::LoadNameIndex { .. }));
        assert!(state.dex.loading);
    }

    #[test]
    fn test_search_submit_opens_query_when_no_suggestion() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchStart);
        for ch in "Zubat".chars() {
            reducer(&mut state, Action::SearchInput(ch));
        }

        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(!state.search.active);
        assert_eq!(
            result.effects,
            vec![Effect::LoadProfile {
                name: "zubat".into()
            }]
        );
        assert_eq!(state.focus, FocusArea::Detail);
    }

    #[test]
    fn test_profile_not_found_sets_failed_view() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("missingno".into()));

        reducer(
            &mut state,
            Action::ProfileDidError {
                name: "missingno".into(),
                error: ApiError::NotFound("u".into()),
            },
        );

        let view = state.detail.as_ref().expect("detail view");
        assert!(matches!(&view.profile, DataResource::Failed(msg) if msg.contains("missingno")));

        reducer(&mut state, Action::DetailClose);
        assert!(state.detail.is_none());
        assert_eq!(state.focus, FocusArea::DexList);
    }

    #[test]
    fn test_profile_for_other_name_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen("mew".into()));

        let profile = PokemonProfile::new(
            details(25, "pikachu"),
            crate::state::SpeciesInfo {
                name: "pikachu".into(),
                flavor_text: None,
                genus: None,
                rarity: None,
            },
        );
        let result = reducer(&mut state, Action::ProfileDidLoad(profile));

        assert!(!result.changed);
        assert!(state.current_profile().is_none());
    }

    #[test]
    fn test_tick_rerenders_only_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);
        state.dex.loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
    }
}
