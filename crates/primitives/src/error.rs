/// Errors returned by the [`EpochClock`](crate::EpochClock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The timestamp precedes the genesis of the rollup.
    #[error("timestamp {timestamp} is before genesis {genesis}")]
    BeforeGenesis {
        /// The queried timestamp.
        timestamp: u64,
        /// The genesis timestamp.
        genesis: u64,
    },
    /// The slot or epoch is too far in the future to be represented as a timestamp.
    #[error("timestamp overflow")]
    TimestampOverflow,
    /// The clock was configured with a zero slot duration or a zero epoch length.
    #[error("slot duration and epoch duration must be non-zero")]
    InvalidConfig,
}
