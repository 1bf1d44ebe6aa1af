//! Pokedex Explorer - a paginated, type-filterable PokeAPI browser.
//!
//! The library holds the store (state, actions, reducer), the HTTP client and
//! the effect runner; the binary wires them to a terminal UI.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod region;
pub mod search;
pub mod state;
pub mod store;
pub mod task;
pub mod type_style;
