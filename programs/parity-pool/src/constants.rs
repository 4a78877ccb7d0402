/// Denominator for every rate held in the config (10_000 = 100%).
pub const RATE_DENOMINATOR: u64 = 10_000;

/// Default platform fee taken from the losing side: 5%
pub const DEFAULT_FEE_RATE: u64 = 500;

/// Default invitor bonus on a winner's net winnings: 1%
pub const DEFAULT_BONUS_RATE: u64 = 100;

/// Default bet count at which a period resolves by itself.
pub const DEFAULT_TRIGGER_NUM: u64 = 10;

/// Slots between closing a period and the slot its entropy samples.
pub const DRAW_DELAY_SLOTS: u64 = 10;

/// The maximum number of wager records a period can hold.
/// Bounded so a full side still fits in a single return-data payload (1024 bytes).
pub const MAX_WAGERS: usize = 24;

/// The maximum number of credits a resolution can produce:
/// one per winning wager, one per invitor, plus the fee receiver.
pub const MAX_CREDITS: usize = MAX_WAGERS * 2 + 1;

/// The seed of the config account PDA.
pub const CONFIG: &[u8] = b"config";

/// The seed of the game account PDA.
pub const GAME: &[u8] = b"game";

/// The seed of the period account PDA.
pub const PERIOD: &[u8] = b"period";

/// The seed of the invitor link account PDA.
pub const INVITOR: &[u8] = b"invitor";
