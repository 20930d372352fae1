//! Types that represent the core data model, such as `ReferenceRow`, `CustomEntry` and `VizRow`.
mod amount;
mod entry;
mod reference;
mod selection;
mod viz;

pub use amount::{Amount, AmountError, BILLION_SUFFIX};
pub use entry::{CustomEntry, Currency, Unit, DEFAULT_LABEL, MAX_LABEL_CHARS};
pub use reference::{ReferenceRow, ReferenceStore};
pub use selection::{filter, Selection};
pub use viz::{compose, VizRow, USER_CATEGORY};
