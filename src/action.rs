use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::state::{DetailBatch, DetailPage, LoadPhase, PokemonProfile, PokemonSummary};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    PageFetchInitial,
    PageFetchNext,
    PageDidLoad {
        generation: u64,
        phase: LoadPhase,
        page: DetailPage,
    },
    PageDidError {
        generation: u64,
        phase: LoadPhase,
        error: ApiError,
    },

    FilterToggle(String),
    FilterToggleCursor,
    FilterCursorMove(i16),
    FilterReset,
    FilterMembersDidLoad {
        generation: u64,
        memberships: Vec<Vec<PokemonSummary>>,
    },
    FilterMembersDidError {
        generation: u64,
        error: ApiError,
    },
    FilterSliceDidLoad {
        generation: u64,
        phase: LoadPhase,
        start: usize,
        consumed: usize,
        batch: DetailBatch,
    },

    NameIndexDidLoad(Vec<PokemonSummary>),
    NameIndexDidError(ApiError),

    SelectionMove(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    DexSelect(usize),

    SearchStart,
    SearchCancel,
    SearchInput(char),
    SearchBackspace,
    SearchSuggestionMove(i16),
    SearchSuggestionSelect(usize),
    SearchSubmit,

    DetailOpen(String),
    DetailOpenSelected,
    DetailClose,
    ProfileDidLoad(PokemonProfile),
    ProfileDidError { name: String, error: ApiError },

    FocusNext,
    FocusPrev,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
