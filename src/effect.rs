use crate::state::{LoadPhase, PokemonSummary};

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch a summary page and the details of every entry on it.
    LoadPage {
        generation: u64,
        phase: LoadPhase,
        url: String,
    },
    /// Fetch the membership list of each selected type.
    LoadTypeMembers {
        generation: u64,
        types: Vec<String>,
    },
    /// Fetch details for a slice of the filtered list.
    LoadFilteredSlice {
        generation: u64,
        phase: LoadPhase,
        start: usize,
        entries: Vec<PokemonSummary>,
    },
    LoadNameIndex {
        url: String,
    },
    LoadProfile {
        name: String,
    },
}
