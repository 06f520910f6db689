//! # shuttle-core
//!
//! Declarative parameter shuttling for configurable effects. An effect
//! declares its parameters once (field, key, default, bounds, optional symbol
//! table) and gets four operations from that single list: reset to defaults,
//! generic traversal for UI or persistence binding, serialize to text, and
//! validate-and-deserialize from text.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shuttle_core::{CapturedParameters, Effect, EffectParameterMethods, Parameter};
//! use shuttle_core::command_parameters::CommandParameters;
//! use shuttle_types::{field, EnumValueSymbol};
//!
//! const MODES: &[EnumValueSymbol] = &[EnumValueSymbol::new("Fast"), EnumValueSymbol::new("Slow")];
//!
//! let params = CapturedParameters::<Amplify>::new(vec![
//!     Parameter::float(field!(AmplifySettings, gain), "Gain", 0.0, -24.0, 24.0),
//!     Parameter::enumeration(field!(AmplifySettings, mode), "Mode", 0, MODES),
//! ])?;
//!
//! params.reset(&mut effect);
//! let text = params.get_parameters(&effect).to_parameter_string(); // Gain="0.0" Mode="Fast"
//! assert!(params.set_parameters(&mut effect, r#"Gain="10.0" Mode="Slow""#));
//! ```
//!
//! ## Module Overview
//!
//! - [`captured`]: `CapturedParameters`, the `Effect` accessor trait and the
//!   `EffectParameterMethods` interface
//! - [`parameter`]: tagged parameter descriptors (`Parameter`)
//! - [`visitor`]: the `SettingsVisitor` traversal contract
//! - [`shuttle`]: visitors for defaults, get and set
//! - [`command_parameters`]: the textual key/value store
//! - [`config`]: factory and user presets from TOML

pub mod captured;
pub mod command_parameters;
pub mod config;
pub mod parameter;
pub mod shuttle;
pub mod visitor;

pub use captured::{
    CapturedParameters, DeclarationError, Effect, EffectParameterMethods, PostSetFn,
};
pub use command_parameters::{CommandParameters, ParameterStore, ParseError};
pub use parameter::{EffectParameter, EnumParameter, Parameter};
pub use visitor::SettingsVisitor;
