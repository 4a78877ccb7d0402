pub mod config;
pub mod game;
pub mod ledger;
pub mod period;
pub mod referral;

pub use config::*;
pub use game::*;
pub use ledger::*;
pub use period::*;
pub use referral::*;
