/// Error codes returned by every ledger entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorization                  |
/// | 20 – 29 | Resource not found             |
/// | 30 – 49 | Validation / input             |
/// | 50 – 59 | Reward-stream state            |
/// | 60 – 69 | Execution (re-entrancy, math)  |
///
/// Any `Err` aborts the invocation and Soroban discards every storage write
/// made during it, so no error leaves partial state behind.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle ────────────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth ─────────────────────────────────────────────────
    Unauthorized = 10,

    // ── Not found ────────────────────────────────────────────
    /// Pool id is `0` or was never created.
    PoolNotFound = 20,
    RewardNotFound = 21,

    // ── Validation ───────────────────────────────────────────
    /// Amount is zero or negative.
    InvalidAmount = 30,
    /// `pool_ids` and `weights` differ in length, or `weights` does not
    /// match the number of attached pools.
    LengthMismatch = 31,
    /// The pool is already attached to the reward stream.
    DuplicatePool = 32,
    /// Zero-length or inverted window, or a time that is not in the future.
    InvalidTimeWindow = 33,
    /// Weights sum to zero.
    InvalidWeights = 34,
    /// Withdrawal larger than the caller's staked balance.
    InsufficientStake = 35,
    /// A draw-down larger than the unemitted funding or the reward balance
    /// the ledger holds outside staked principal.
    InsufficientRewardAmount = 36,

    // ── Reward-stream state ──────────────────────────────────
    /// The stream's `end_time` has passed.
    RewardEnded = 50,
    /// The stream already started; its start time is frozen.
    RewardStarted = 51,

    // ── Execution ────────────────────────────────────────────
    /// A ledger operation was entered while another one was still running.
    Reentrant = 60,
    ArithmeticOverflow = 61,
}
