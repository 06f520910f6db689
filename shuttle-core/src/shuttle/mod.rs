//! Concrete settings visitors: defaults, serialize-to-store, and
//! validate-and-deserialize-from-store.

mod defaults;
mod get;
mod set;

pub use defaults::ShuttleDefaults;
pub use get::ShuttleGetAutomation;
pub use set::ShuttleSetAutomation;
