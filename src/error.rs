use thiserror::Error;

/// Why a value was not admitted to a RecordTable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{0} is already in the table")]
    Duplicate(u64),
    #[error("{value} is not smaller than the maximum {max} of a full table")]
    NotARecord { value: u64, max: u64 },
    #[error("the table has a max size of zero")]
    ZeroCapacity,
}
