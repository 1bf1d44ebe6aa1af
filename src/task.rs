//! Turns effects into the async work that resolves them.

use std::sync::Arc;

use crate::action::Action;
use crate::api::{self, PokedexApi};
use crate::effect::Effect;
use crate::state::DetailPage;

/// Task key shared by every effect that feeds `pokemon_list`, so a newer
/// fetch context cancels the previous one.
pub const LIST_TASK: &str = "pokedex_list";
pub const NAME_INDEX_TASK: &str = "name_index";
pub const PROFILE_TASK: &str = "profile";

pub fn task_key(effect: &Effect) -> &'static str {
    match effect {
        Effect::LoadPage { .. }
        | Effect::LoadTypeMembers { .. }
        | Effect::LoadFilteredSlice { .. } => LIST_TASK,
        Effect::LoadNameIndex { .. } => NAME_INDEX_TASK,
        Effect::LoadProfile { .. } => PROFILE_TASK,
    }
}

#[derive(Clone)]
pub struct EffectRunner {
    api: Arc<dyn PokedexApi>,
    detail_concurrency: usize,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn PokedexApi>, detail_concurrency: usize) -> Self {
        Self {
            api,
            detail_concurrency,
        }
    }

    pub async fn run(self, effect: Effect) -> Action {
        match effect {
            Effect::LoadPage {
                generation,
                phase,
                url,
            } => match api::fetch_detail_page(self.api, &url, self.detail_concurrency).await {
                Ok((batch, next)) => Action::PageDidLoad {
                    generation,
                    phase,
                    page: DetailPage { batch, next },
                },
                Err(error) => Action::PageDidError {
                    generation,
                    phase,
                    error,
                },
            },
            Effect::LoadTypeMembers { generation, types } => {
                match api::fetch_memberships(self.api, &types).await {
                    Ok(memberships) => Action::FilterMembersDidLoad {
                        generation,
                        memberships,
                    },
                    Err(error) => Action::FilterMembersDidError { generation, error },
                }
            }
            Effect::LoadFilteredSlice {
                generation,
                phase,
                start,
                entries,
            } => {
                let consumed = entries.len();
                let batch =
                    api::fetch_detail_batch(self.api, entries, self.detail_concurrency).await;
                Action::FilterSliceDidLoad {
                    generation,
                    phase,
                    start,
                    consumed,
                    batch,
                }
            }
            Effect::LoadNameIndex { url } => match self.api.summary_page(&url).await {
                Ok(page) => Action::NameIndexDidLoad(page.results),
                Err(error) => Action::NameIndexDidError(error),
            },
            Effect::LoadProfile { name } => match api::fetch_profile(self.api, &name).await {
                Ok(profile) => Action::ProfileDidLoad(profile),
                Err(error) => Action::ProfileDidError { name, error },
            },
        }
    }
}
