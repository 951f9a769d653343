//! RecordTable is a data structure that keeps track of the smallest values
//! seen so far in a stream of `u64` values, the "records".  Unlike a plain
//! top-N structure, the number of values it keeps is not fixed: it grows
//! while new values keep landing near the front of the table, and it sheds
//! its largest value whenever a newcomer lands too far back.
//!
//! Two knobs control this.  The `max_size` is a hard cap; the table never
//! holds more values than that.  The `threshold` is the deepest position at
//! which a newly admitted value may land without costing the table its
//! current maximum.  The threshold is either an absolute position, or a
//! percentage of the table's current size, in which case the retention window
//! widens as the table fills.
//!
//! With an effectively unbounded `max_size` and an absolute threshold of k,
//! the table grows roughly like k * ln(n) over a stream of n random values:
//! a value only makes it in if it beats all but k of the records so far.
//!
//! Values are unique.  Showing the table a value it already holds is a no-op,
//! as is showing a full table a value that is not smaller than its maximum.
//!
//! ```
//! use adaptive_table::RecordTable;
//!
//! let mut table = RecordTable::new(3);
//! assert_eq!(table.insert(10), Some(0));
//! assert_eq!(table.insert(10), None); // already there
//! assert_eq!(table.insert(9), Some(0));
//! assert_eq!(table.insert(11), Some(2));
//! assert_eq!(table.values(), &[9, 10, 11]);
//!
//! // Full, and 12 is no better than what we have.
//! assert_eq!(table.insert(12), None);
//!
//! // 1 is a record; it goes in front and 11 falls off the end.
//! let admission = table.admit(1).unwrap();
//! assert_eq!(admission.index, 0);
//! assert_eq!(admission.evicted, Some(11));
//! assert_eq!(table.values(), &[1, 9, 10]);
//! ```
//!
//! The index returned by `insert` is the value's rank at the moment it was
//! admitted.  If that same insertion pushed the table past its bounds, the
//! largest value is evicted afterwards, and that may be the value that was
//! just inserted.  Use `admit` when you need to know what was evicted.
//!
//! RecordTable is meant for a single owner.  It is plain data, so it can be
//! shared across threads behind a lock like anything else.

mod error;
mod record_table;

pub use error::TableError;
pub use record_table::{Admission, Iter, RecordTable, TableConfig};
