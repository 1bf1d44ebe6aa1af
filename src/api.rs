use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::ExplorerConfig;
use crate::state::{
    AbilityRecord, DetailBatch, DetailFailure, PokemonDetails, PokemonProfile, PokemonSprites,
    PokemonStat, PokemonSummary, Rarity, SpeciesInfo, SummaryPage,
};

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("response parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Read-only access to the PokeAPI resources the explorer needs.
#[async_trait]
pub trait PokedexApi: Send + Sync {
    async fn summary_page(&self, url: &str) -> Result<SummaryPage, ApiError>;
    async fn details(&self, url: &str) -> Result<PokemonDetails, ApiError>;
    async fn type_members(&self, type_name: &str) -> Result<Vec<PokemonSummary>, ApiError>;
    async fn pokemon(&self, name: &str) -> Result<PokemonDetails, ApiError>;
    async fn species(&self, name: &str) -> Result<SpeciesInfo, ApiError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
    next: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    name: String,
    #[serde(default)]
    is_baby: bool,
    #[serde(default)]
    is_legendary: bool,
    #[serde(default)]
    is_mythical: bool,
    flavor_text_entries: Vec<FlavorTextEntry>,
    genera: Vec<GenusEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: LanguageRef,
}

#[derive(Clone, Debug, Deserialize)]
struct GenusEntry {
    genus: String,
    language: LanguageRef,
}

#[derive(Clone, Debug, Deserialize)]
struct LanguageRef {
    name: String,
}

impl From<NamedResource> for PokemonSummary {
    fn from(resource: NamedResource) -> Self {
        PokemonSummary {
            name: resource.name,
            url: resource.url,
        }
    }
}

impl From<ListResponse> for SummaryPage {
    fn from(response: ListResponse) -> Self {
        SummaryPage {
            results: response.results.into_iter().map(Into::into).collect(),
            next: response.next,
        }
    }
}

impl From<PokemonResponse> for PokemonDetails {
    fn from(response: PokemonResponse) -> Self {
        let mut types = response.types;
        types.sort_by_key(|slot| slot.slot);

        let sprites = PokemonSprites {
            front_default: pointer_string(&response.sprites, "/front_default"),
            front_shiny: pointer_string(&response.sprites, "/front_shiny"),
            official_artwork: pointer_string(
                &response.sprites,
                "/other/official-artwork/front_default",
            ),
        };

        PokemonDetails {
            id: response.id,
            name: response.name,
            sprites,
            types: types.into_iter().map(|slot| slot.type_info.name).collect(),
            height: response.height,
            weight: response.weight,
            stats: response
                .stats
                .into_iter()
                .map(|slot| PokemonStat {
                    name: slot.stat.name,
                    base_value: slot.base_stat,
                })
                .collect(),
            moves: response
                .moves
                .into_iter()
                .map(|slot| slot.move_info.name)
                .collect(),
            base_experience: response.base_experience,
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| AbilityRecord {
                    name: slot.ability.name,
                    is_hidden: slot.is_hidden,
                })
                .collect(),
        }
    }
}

impl From<PokemonSpeciesResponse> for SpeciesInfo {
    fn from(response: PokemonSpeciesResponse) -> Self {
        let flavor_text = response
            .flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| sanitize_text(&entry.flavor_text));
        let genus = response
            .genera
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.genus.clone());
        SpeciesInfo {
            name: response.name,
            flavor_text,
            genus,
            rarity: Rarity::from_flags(
                response.is_mythical,
                response.is_legendary,
                response.is_baby,
            ),
        }
    }
}

pub struct HttpPokedexApi {
    client: reqwest::Client,
    config: ExplorerConfig,
}

impl HttpPokedexApi {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(err.to_string()))
    }
}

#[async_trait]
impl PokedexApi for HttpPokedexApi {
    async fn summary_page(&self, url: &str) -> Result<SummaryPage, ApiError> {
        let response: ListResponse = self.get_json(url).await?;
        Ok(response.into())
    }

    async fn details(&self, url: &str) -> Result<PokemonDetails, ApiError> {
        let response: PokemonResponse = self.get_json(url).await?;
        Ok(response.into())
    }

    async fn type_members(&self, type_name: &str) -> Result<Vec<PokemonSummary>, ApiError> {
        let response: TypeDetailResponse = self.get_json(&self.config.type_url(type_name)).await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|entry| entry.pokemon.into())
            .collect())
    }

    async fn pokemon(&self, name: &str) -> Result<PokemonDetails, ApiError> {
        self.details(&self.config.pokemon_url(name)).await
    }

    async fn species(&self, name: &str) -> Result<SpeciesInfo, ApiError> {
        let response: PokemonSpeciesResponse =
            self.get_json(&self.config.species_url(name)).await?;
        Ok(response.into())
    }
}

/// Fetches details for every entry, at most `concurrency` at a time.
///
/// Results keep request order. A failed entry is reported in `failures` and
/// does not affect the others.
pub async fn fetch_detail_batch(
    api: Arc<dyn PokedexApi>,
    entries: Vec<PokemonSummary>,
    concurrency: usize,
) -> DetailBatch {
    if entries.is_empty() {
        return DetailBatch::default();
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();
    for (index, entry) in entries.iter().cloned().enumerate() {
        let api = Arc::clone(&api);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => api.details(&entry.url).await,
                Err(_) => Err(ApiError::Request("detail semaphore closed".to_string())),
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<PokemonDetails, ApiError>>> = vec![None; entries.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(err) => tracing::warn!(error = %err, "detail task failed to join"),
        }
    }

    let mut batch = DetailBatch::default();
    for (entry, slot) in entries.into_iter().zip(slots) {
        match slot {
            Some(Ok(details)) => batch.details.push(details),
            Some(Err(error)) => batch.failures.push(DetailFailure {
                name: entry.name,
                error,
            }),
            None => batch.failures.push(DetailFailure {
                name: entry.name,
                error: ApiError::Request("detail task aborted".to_string()),
            }),
        }
    }
    if !batch.failures.is_empty() {
        tracing::warn!(
            failed = batch.failures.len(),
            loaded = batch.details.len(),
            "detail fan-out had failures"
        );
    }
    batch
}

/// Fetches the membership list of every type concurrently, in input order.
/// Any failure fails the whole call.
pub async fn fetch_memberships(
    api: Arc<dyn PokedexApi>,
    types: &[String],
) -> Result<Vec<Vec<PokemonSummary>>, ApiError> {
    let mut join_set = JoinSet::new();
    for (index, type_name) in types.iter().cloned().enumerate() {
        let api = Arc::clone(&api);
        join_set.spawn(async move { (index, api.type_members(&type_name).await) });
    }

    let mut lists: Vec<Vec<PokemonSummary>> = vec![Vec::new(); types.len()];
    while let Some(joined) = join_set.join_next().await {
        let (index, result) = joined.map_err(|err| ApiError::Request(err.to_string()))?;
        lists[index] = result?;
    }
    Ok(lists)
}

/// Fetches the page at `url` and then the details of every entry on it.
pub async fn fetch_detail_page(
    api: Arc<dyn PokedexApi>,
    url: &str,
    concurrency: usize,
) -> Result<(DetailBatch, Option<String>), ApiError> {
    let page = api.summary_page(url).await?;
    let batch = fetch_detail_batch(api, page.results, concurrency).await;
    Ok((batch, page.next))
}

pub async fn fetch_profile(
    api: Arc<dyn PokedexApi>,
    name: &str,
) -> Result<PokemonProfile, ApiError> {
    let (details, species) = tokio::try_join!(api.pokemon(name), api.species(name))?;
    Ok(PokemonProfile::new(details, species))
}

fn sanitize_text(text: &str) -> String {
    text.replace(['\n', '\u{000C}'], " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
