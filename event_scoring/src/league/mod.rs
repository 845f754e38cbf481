//! League format: teams are dealt into blocks, each block plays a round robin,
//! and the top finishers of every block seed a single-elimination playoff.
//!
//! Block matches and playoff matches share the sport's single match list; a
//! block match is one with `block_id` set.

pub mod blocks;
pub mod schedule;

pub use blocks::{
    block_id, block_name, block_stage_matches, compute_advancing_teams, compute_block_standings,
    distribute_into_blocks, generate_playoff, reconstruct_blocks, scored_matches_at_risk,
};
pub use schedule::{all_pairings, block_matches, generate_round_robin_matches};
