use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::api::ApiError;
use crate::config::ExplorerConfig;
use crate::region::Region;
use crate::search::{self, Suggestion};
use crate::store::PokedexState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

impl PokemonSummary {
    /// Numeric id at the end of the resource url, e.g. `.../pokemon/25/`.
    pub fn dex_number(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub official_artwork: Option<String>,
}

impl PokemonSprites {
    pub fn artwork(&self) -> Option<&str> {
        self.official_artwork
            .as_deref()
            .or(self.front_default.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub base_value: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    pub sprites: PokemonSprites,
    /// Type tags in slot order.
    pub types: Vec<String>,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub stats: Vec<PokemonStat>,
    pub moves: Vec<String>,
    pub base_experience: Option<u32>,
    pub abilities: Vec<AbilityRecord>,
}

impl PokemonDetails {
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("normal")
    }

    pub fn region(&self) -> Option<Region> {
        crate::region::region_for_id(i64::from(self.id)).ok()
    }
}

/// One page of the unfiltered list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPage {
    pub results: Vec<PokemonSummary>,
    pub next: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailFailure {
    pub name: String,
    pub error: ApiError,
}

/// Result of a detail fan-out: successes in request order plus per-item failures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailBatch {
    pub details: Vec<PokemonDetails>,
    pub failures: Vec<DetailFailure>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailPage {
    pub batch: DetailBatch,
    pub next: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPhase {
    /// Replaces the list; tracked by `loading`.
    Initial,
    /// Appends to the list; tracked by `is_loading_more`.
    More,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Mythical,
    Legendary,
    Baby,
}

impl Rarity {
    pub fn from_flags(is_mythical: bool, is_legendary: bool, is_baby: bool) -> Option<Self> {
        if is_mythical {
            Some(Rarity::Mythical)
        } else if is_legendary {
            Some(Rarity::Legendary)
        } else if is_baby {
            Some(Rarity::Baby)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Mythical => "Mythical",
            Rarity::Legendary => "Legendary",
            Rarity::Baby => "Baby",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub name: String,
    pub flavor_text: Option<String>,
    pub genus: Option<String>,
    pub rarity: Option<Rarity>,
}

/// Everything the detail view shows for one Pokemon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonProfile {
    pub details: PokemonDetails,
    pub species: SpeciesInfo,
    pub region: Option<Region>,
}

impl PokemonProfile {
    pub fn new(details: PokemonDetails, species: SpeciesInfo) -> Self {
        let region = details.region();
        Self {
            details,
            species,
            region,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailView {
    pub name: String,
    pub profile: DataResource<PokemonProfile>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    FilterBar,
    DexList,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub selected: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub config: ExplorerConfig,
    pub dex: PokedexState,
    pub terminal_size: (u16, u16),
    pub focus: FocusArea,
    pub selected_index: usize,
    pub type_cursor: usize,
    pub search: SearchState,
    pub name_index: Vec<PokemonSummary>,
    pub name_index_loading: bool,
    pub detail: Option<DetailView>,
    pub message: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        let dex = PokedexState::new(config.first_page_url());
        Self {
            config,
            dex,
            terminal_size: (80, 24),
            focus: FocusArea::DexList,
            selected_index: 0,
            type_cursor: 0,
            search: SearchState::default(),
            name_index: Vec::new(),
            name_index_loading: false,
            detail: None,
            message: None,
            tick: 0,
        }
    }

    pub fn selected_pokemon(&self) -> Option<&PokemonDetails> {
        self.dex.pokemon_list.get(self.selected_index)
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.dex.pokemon_list.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.dex.pokemon_list.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// True once the selection is close enough to the end to load more.
    pub fn near_list_end(&self) -> bool {
        let len = self.dex.pokemon_list.len();
        len > 0 && self.selected_index + self.config.scroll_threshold >= len.saturating_sub(1)
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        search::suggestions(&self.name_index, &self.search.query)
    }

    pub fn current_profile(&self) -> Option<&PokemonProfile> {
        self.detail.as_ref().and_then(|view| view.profile.data())
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusArea::FilterBar => FocusArea::DexList,
            FocusArea::DexList if self.detail.is_some() => FocusArea::Detail,
            FocusArea::DexList => FocusArea::FilterBar,
            FocusArea::Detail => FocusArea::FilterBar,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FocusArea::FilterBar if self.detail.is_some() => FocusArea::Detail,
            FocusArea::FilterBar => FocusArea::DexList,
            FocusArea::DexList => FocusArea::FilterBar,
            FocusArea::Detail => FocusArea::DexList,
        };
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Store")
                .entry("mode", ron_string(&self.dex.mode()))
                .entry("generation", ron_string(&self.dex.generation))
                .entry("listed", ron_string(&self.dex.pokemon_list.len()))
                .entry("next_url", ron_string(&self.dex.next_url))
                .entry("loading", ron_string(&self.dex.loading))
                .entry("loading_more", ron_string(&self.dex.is_loading_more)),
            DebugSection::new("Filters")
                .entry("types", ron_string(&self.dex.selected_types))
                .entry("filtered", ron_string(&self.dex.filtered_pokemon.len()))
                .entry("filter_index", ron_string(&self.dex.filter_index))
                .entry("cursor", ron_string(&self.type_cursor)),
            DebugSection::new("View")
                .entry("selected", ron_string(&self.selected_index))
                .entry("focus", ron_string(&self.focus))
                .entry("search", ron_string(&self.search.query))
                .entry(
                    "detail",
                    ron_string(&self.detail.as_ref().map(|view| view.name.clone())),
                )
                .entry("name_index", ron_string(&self.name_index.len()))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
