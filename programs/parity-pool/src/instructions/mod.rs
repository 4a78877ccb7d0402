// Player instructions
pub mod place_bet;
pub mod set_invitor;
pub mod claim;

// Draw
pub mod lottery;
pub mod settle;

// Admin instructions
pub mod initialize;
pub mod set_fee_rate;
pub mod set_bonus_rate;
pub mod set_fee_receiver;
pub mod set_trigger_num;
pub mod set_var_address;
pub mod new_var;

// Read-only
pub mod views;

// Glob re-exports are needed for Anchor macro to generate client accounts
// The ambiguous `handler` name is intentional - each module has its own handler
#[allow(ambiguous_glob_reexports)]
pub use place_bet::*;
#[allow(ambiguous_glob_reexports)]
pub use set_invitor::*;
#[allow(ambiguous_glob_reexports)]
pub use claim::*;
#[allow(ambiguous_glob_reexports)]
pub use lottery::*;
#[allow(ambiguous_glob_reexports)]
pub use settle::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use set_fee_rate::*;
#[allow(ambiguous_glob_reexports)]
pub use set_bonus_rate::*;
#[allow(ambiguous_glob_reexports)]
pub use set_fee_receiver::*;
#[allow(ambiguous_glob_reexports)]
pub use set_trigger_num::*;
#[allow(ambiguous_glob_reexports)]
pub use set_var_address::*;
#[allow(ambiguous_glob_reexports)]
pub use new_var::*;
pub use views::*;
