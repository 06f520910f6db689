//! # shuttle-types
//!
//! Plain data shared by the parameter shuttling engine: value kinds and their
//! text codec, per-parameter specs, enumeration symbol tables, and the field
//! locator used to reach into an owning settings structure.

mod field;
mod param;
mod symbol;

pub use field::Field;
pub use param::{ParamKind, ParamType, ScalarSpec};
pub use symbol::{find_symbol, EnumSpec, EnumValueSymbol, ObsoleteName};
