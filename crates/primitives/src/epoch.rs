//! Slot and epoch arithmetic anchored on L1 time.

use crate::ClockError;

/// Maps L1 timestamps to rollup slots and epochs.
///
/// A slot lasts `slot_duration` seconds starting at the genesis timestamp and an epoch groups
/// `epoch_duration` consecutive slots:
/// `slot = (timestamp - genesis) / slot_duration` and `epoch = slot / epoch_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpochClock {
    genesis_timestamp: u64,
    slot_duration: u64,
    epoch_duration: u64,
}

impl EpochClock {
    /// Returns a new clock. Fails if the slot duration or the number of slots per epoch is zero.
    pub const fn new(
        genesis_timestamp: u64,
        slot_duration: u64,
        epoch_duration: u64,
    ) -> Result<Self, ClockError> {
        if slot_duration == 0 || epoch_duration == 0 {
            return Err(ClockError::InvalidConfig)
        }
        Ok(Self { genesis_timestamp, slot_duration, epoch_duration })
    }

    /// Returns the genesis timestamp.
    pub const fn genesis_timestamp(&self) -> u64 {
        self.genesis_timestamp
    }

    /// Returns the slot duration in seconds.
    pub const fn slot_duration(&self) -> u64 {
        self.slot_duration
    }

    /// Returns the number of slots in an epoch.
    pub const fn epoch_duration(&self) -> u64 {
        self.epoch_duration
    }

    /// Returns the length of an epoch in seconds.
    pub const fn epoch_duration_secs(&self) -> Result<u64, ClockError> {
        match self.slot_duration.checked_mul(self.epoch_duration) {
            Some(secs) => Ok(secs),
            None => Err(ClockError::TimestampOverflow),
        }
    }

    /// Returns the slot containing the timestamp.
    pub const fn slot_at(&self, timestamp: u64) -> Result<u64, ClockError> {
        if timestamp < self.genesis_timestamp {
            return Err(ClockError::BeforeGenesis { timestamp, genesis: self.genesis_timestamp })
        }
        Ok((timestamp - self.genesis_timestamp) / self.slot_duration)
    }

    /// Returns the epoch containing the timestamp.
    pub const fn epoch_at(&self, timestamp: u64) -> Result<u64, ClockError> {
        match self.slot_at(timestamp) {
            Ok(slot) => Ok(self.epoch_for_slot(slot)),
            Err(err) => Err(err),
        }
    }

    /// Returns the epoch containing the slot.
    pub const fn epoch_for_slot(&self, slot: u64) -> u64 {
        slot / self.epoch_duration
    }

    /// Returns the first slot of the epoch.
    pub const fn first_slot_of_epoch(&self, epoch: u64) -> Result<u64, ClockError> {
        match epoch.checked_mul(self.epoch_duration) {
            Some(slot) => Ok(slot),
            None => Err(ClockError::TimestampOverflow),
        }
    }

    /// Returns the timestamp at which the slot starts.
    pub const fn timestamp_for_slot(&self, slot: u64) -> Result<u64, ClockError> {
        match slot.checked_mul(self.slot_duration) {
            Some(offset) => match self.genesis_timestamp.checked_add(offset) {
                Some(timestamp) => Ok(timestamp),
                None => Err(ClockError::TimestampOverflow),
            },
            None => Err(ClockError::TimestampOverflow),
        }
    }

    /// Returns the timestamp at which the epoch starts.
    pub const fn timestamp_for_epoch(&self, epoch: u64) -> Result<u64, ClockError> {
        match self.first_slot_of_epoch(epoch) {
            Ok(slot) => self.timestamp_for_slot(slot),
            Err(err) => Err(err),
        }
    }

    /// Returns the slot `epochs` whole epochs after `slot`.
    pub const fn slot_after_epochs(&self, slot: u64, epochs: u64) -> Result<u64, ClockError> {
        match epochs.checked_mul(self.epoch_duration) {
            Some(slots) => match slot.checked_add(slots) {
                Some(target) => Ok(target),
                None => Err(ClockError::TimestampOverflow),
            },
            None => Err(ClockError::TimestampOverflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: u64 = 1_700_000_000;

    fn clock() -> EpochClock {
        EpochClock::new(GENESIS, 12, 32).unwrap()
    }

    #[test]
    fn test_slot_and_epoch_arithmetic() {
        let clock = clock();

        assert_eq!(clock.slot_at(GENESIS + 12 * 32 * 3 + 12 * 5).unwrap(), 101);
        assert_eq!(clock.epoch_at(GENESIS + 12 * 32 * 3 + 12 * 5).unwrap(), 3);
        assert_eq!(clock.timestamp_for_slot(100).unwrap(), GENESIS + 1200);
        assert_eq!(clock.timestamp_for_epoch(2).unwrap(), GENESIS + 768);
        assert_eq!(clock.epoch_duration_secs().unwrap(), 384);
    }

    #[test]
    fn test_slot_boundaries() {
        let clock = clock();

        assert_eq!(clock.slot_at(GENESIS).unwrap(), 0);
        assert_eq!(clock.slot_at(GENESIS + 11).unwrap(), 0);
        assert_eq!(clock.slot_at(GENESIS + 12).unwrap(), 1);
        assert_eq!(clock.epoch_at(GENESIS + 383).unwrap(), 0);
        assert_eq!(clock.epoch_at(GENESIS + 384).unwrap(), 1);
    }

    #[test]
    fn test_slot_timestamp_consistency() {
        let clock = clock();
        for slot in [0, 1, 31, 32, 1_000, 123_456] {
            let start = clock.timestamp_for_slot(slot).unwrap();
            assert_eq!(clock.slot_at(start).unwrap(), slot);
            assert_eq!(clock.slot_at(start + clock.slot_duration() - 1).unwrap(), slot);
        }
    }

    #[test]
    fn test_before_genesis() {
        let err = clock().slot_at(GENESIS - 1).unwrap_err();
        assert_eq!(err, ClockError::BeforeGenesis { timestamp: GENESIS - 1, genesis: GENESIS });
        assert!(clock().epoch_at(0).is_err());
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(EpochClock::new(GENESIS, 0, 32), Err(ClockError::InvalidConfig));
        assert_eq!(EpochClock::new(GENESIS, 12, 0), Err(ClockError::InvalidConfig));
    }

    #[test]
    fn test_overflow() {
        let clock = clock();
        assert_eq!(clock.timestamp_for_slot(u64::MAX), Err(ClockError::TimestampOverflow));
        assert_eq!(clock.slot_after_epochs(u64::MAX - 1, 1), Err(ClockError::TimestampOverflow));
    }

    #[test]
    fn test_slot_after_epochs() {
        let clock = clock();
        let target = clock.slot_after_epochs(70, 2).unwrap();

        assert_eq!(target, 134);
        assert_eq!(clock.epoch_for_slot(target), clock.epoch_for_slot(70) + 2);
    }
}
