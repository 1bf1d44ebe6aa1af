//! In-memory PokeAPI used by the integration tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pokedex_explorer::action::Action;
use pokedex_explorer::api::{ApiError, PokedexApi};
use pokedex_explorer::config::ExplorerConfig;
use pokedex_explorer::effect::Effect;
use pokedex_explorer::state::{
    PokemonDetails, PokemonSprites, PokemonStat, PokemonSummary, SpeciesInfo, SummaryPage,
};
use pokedex_explorer::task::EffectRunner;

pub const CATALOG_SIZE: u32 = 120;
/// Detail lookups resolve beyond the listed catalog, like the real dex.
pub const MAX_DEX: u32 = 1025;
pub const BASE: &str = "https://pokeapi.co/api/v2";

pub fn pokemon_url(id: u32) -> String {
    format!("{BASE}/pokemon/{id}/")
}

pub fn page_url(offset: u32, limit: u32) -> String {
    if offset == 0 {
        format!("{BASE}/pokemon?limit={limit}")
    } else {
        format!("{BASE}/pokemon?offset={offset}&limit={limit}")
    }
}

pub fn name(id: u32) -> String {
    format!("mon-{id}")
}

pub fn summary(id: u32) -> PokemonSummary {
    PokemonSummary {
        name: name(id),
        url: pokemon_url(id),
    }
}

pub fn details(id: u32) -> PokemonDetails {
    let primary = if id % 2 == 0 { "fire" } else { "water" };
    let mut types = vec![primary.to_string()];
    if id % 3 == 0 {
        types.push("flying".to_string());
    }
    PokemonDetails {
        id,
        name: name(id),
        sprites: PokemonSprites {
            front_default: Some(format!("{id}.png")),
            front_shiny: None,
            official_artwork: None,
        },
        types,
        height: 7,
        weight: 69,
        stats: vec![PokemonStat {
            name: "hp".to_string(),
            base_value: 45,
        }],
        moves: vec!["tackle".to_string()],
        base_experience: Some(64),
        abilities: Vec::new(),
    }
}

/// Fake PokeAPI with 120 entries. Even ids are fire, multiples of three are
/// flying.
#[derive(Default)]
pub struct FakeApi {
    failing_details: HashSet<String>,
    failing_pages: HashSet<String>,
    failing_types: HashSet<String>,
    delay_by_id: bool,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub requested: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_detail(mut self, id: u32) -> Self {
        self.failing_details.insert(pokemon_url(id));
        self
    }

    pub fn failing_page(mut self, url: &str) -> Self {
        self.failing_pages.insert(url.to_string());
        self
    }

    pub fn failing_type(mut self, type_name: &str) -> Self {
        self.failing_types.insert(type_name.to_string());
        self
    }

    /// Lower ids answer later, so completion order is the reverse of request order.
    pub fn reverse_latency(mut self) -> Self {
        self.delay_by_id = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, what: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(what.to_string());
        }
    }

    fn members(type_name: &str) -> Vec<PokemonSummary> {
        (1..=CATALOG_SIZE)
            .filter(|id| match type_name {
                "fire" => id % 2 == 0,
                "water" => id % 2 == 1,
                "flying" => id % 3 == 0,
                "dragon" => id % 7 == 0,
                _ => false,
            })
            .map(summary)
            .collect()
    }

    fn parse_page(url: &str) -> Option<(u32, u32)> {
        let query = url.strip_prefix(&format!("{BASE}/pokemon?"))?;
        let mut offset = 0;
        let mut limit = 20;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=')?;
            match key {
                "offset" => offset = value.parse().ok()?,
                "limit" => limit = value.parse().ok()?,
                _ => return None,
            }
        }
        Some((offset, limit))
    }

    fn id_from_url(url: &str) -> Option<u32> {
        url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }
}

#[async_trait]
impl PokedexApi for FakeApi {
    async fn summary_page(&self, url: &str) -> Result<SummaryPage, ApiError> {
        self.record(url);
        if self.failing_pages.contains(url) {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        let (offset, limit) =
            Self::parse_page(url).ok_or_else(|| ApiError::NotFound(url.to_string()))?;
        let end = (offset + limit).min(CATALOG_SIZE);
        let results = (offset + 1..=end).map(summary).collect();
        let next = (end < CATALOG_SIZE).then(|| page_url(end, limit));
        Ok(SummaryPage { results, next })
    }

    async fn details(&self, url: &str) -> Result<PokemonDetails, ApiError> {
        self.record(url);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let id = Self::id_from_url(url);
        if self.delay_by_id {
            let wait = 40u64.saturating_sub(u64::from(id.unwrap_or(0)) * 3);
            tokio::time::sleep(Duration::from_millis(wait)).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_details.contains(url) {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        match id {
            Some(id) if (1..=MAX_DEX).contains(&id) => Ok(details(id)),
            _ => Err(ApiError::NotFound(url.to_string())),
        }
    }

    async fn type_members(&self, type_name: &str) -> Result<Vec<PokemonSummary>, ApiError> {
        self.record(&format!("type/{type_name}"));
        if self.failing_types.contains(type_name) {
            return Err(ApiError::Request(format!("{type_name} unreachable")));
        }
        Ok(Self::members(type_name))
    }

    async fn pokemon(&self, name: &str) -> Result<PokemonDetails, ApiError> {
        let id = name
            .strip_prefix("mon-")
            .and_then(|id| id.parse::<u32>().ok())
            .or_else(|| name.parse().ok())
            .ok_or_else(|| ApiError::NotFound(name.to_string()))?;
        self.details(&pokemon_url(id)).await
    }

    async fn species(&self, name: &str) -> Result<SpeciesInfo, ApiError> {
        self.record(&format!("species/{name}"));
        let details = self.pokemon(name).await?;
        Ok(SpeciesInfo {
            name: details.name,
            flavor_text: Some("A test Pokemon.".to_string()),
            genus: Some("Fixture Pokemon".to_string()),
            rarity: None,
        })
    }
}

pub fn config() -> ExplorerConfig {
    ExplorerConfig::default()
}

pub fn runner(api: Arc<FakeApi>) -> EffectRunner {
    EffectRunner::new(api, config().detail_concurrency)
}

/// Runs effects to completion, feeding every resulting action back through
/// `dispatch` until no effects remain.
pub async fn settle<F>(runner: &EffectRunner, effects: Vec<Effect>, mut dispatch: F)
where
    F: FnMut(Action) -> Vec<Effect>,
{
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        let action = runner.clone().run(effect).await;
        queue.extend(dispatch(action));
    }
}

pub fn ids(list: &[PokemonDetails]) -> Vec<u32> {
    list.iter().map(|details| details.id).collect()
}

pub fn summary_ids(list: &[PokemonSummary]) -> Vec<u32> {
    list.iter().filter_map(|entry| entry.dex_number()).collect()
}
