//! The parameter set engine.
//!
//! A [`CapturedParameters`] is declared once per effect type from an ordered
//! list of [`Parameter`]s and derives reset, visit, get and set from that one
//! list. Operations borrow the effect's settings for the duration of a single
//! call; concurrent mutation of the settings from elsewhere during a call is
//! the caller's problem.

use std::collections::HashSet;
use std::fmt;

use crate::command_parameters::{CommandParameters, ParameterStore};
use crate::parameter::Parameter;
use crate::shuttle::{ShuttleDefaults, ShuttleSetAutomation};
use crate::visitor::SettingsVisitor;

/// A configurable component whose parameters live in a settings structure.
///
/// Returning `None` means the effect has no parameters right now: reset,
/// visit and get do nothing and set fails.
pub trait Effect {
    type Settings;

    fn fetch_parameters(&mut self) -> Option<&mut Self::Settings>;

    fn fetch_parameters_ref(&self) -> Option<&Self::Settings>;
}

/// The four operations every parameter set provides.
pub trait EffectParameterMethods<E: Effect> {
    /// Assign every declared default.
    fn reset(&self, effect: &mut E);

    /// Drive `visitor` over every parameter in declaration order.
    fn visit(&self, effect: &mut E, visitor: &mut dyn SettingsVisitor<'_>);

    /// Write every current value into `parms`.
    fn get(&self, effect: &E, parms: &mut dyn ParameterStore);

    /// Read and validate every value from `parms`. Returns `false` on the
    /// first failure; parameters before the failing one stay assigned.
    fn set(&self, effect: &mut E, parms: &dyn ParameterStore) -> bool;
}

/// Called after all per-field work in reset (`updating == false`, result
/// ignored) and in a fully successful set (`updating == true`, result
/// returned).
pub type PostSetFn<S> = Box<dyn Fn(&mut S, bool) -> bool + Send + Sync>;

/// A declared parameter list violates one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    DuplicateKey(&'static str),
    DefaultOutOfRange(&'static str),
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "parameter key {:?} declared twice", key),
            Self::DefaultOutOfRange(key) => {
                write!(f, "default of parameter {:?} is outside its declared range", key)
            }
        }
    }
}

impl std::error::Error for DeclarationError {}

pub struct CapturedParameters<E: Effect> {
    parameters: Vec<Parameter<E::Settings>>,
    post_set: Option<PostSetFn<E::Settings>>,
}

impl<E: Effect> CapturedParameters<E> {
    pub fn new(parameters: Vec<Parameter<E::Settings>>) -> Result<Self, DeclarationError> {
        check_declaration(&parameters)?;
        Ok(Self {
            parameters,
            post_set: None,
        })
    }

    /// Like [`new`](Self::new), with a hook run at the end of reset and set.
    pub fn with_post_set<F>(
        parameters: Vec<Parameter<E::Settings>>,
        post_set: F,
    ) -> Result<Self, DeclarationError>
    where
        F: Fn(&mut E::Settings, bool) -> bool + Send + Sync + 'static,
    {
        check_declaration(&parameters)?;
        Ok(Self {
            parameters,
            post_set: Some(Box::new(post_set)),
        })
    }

    pub fn parameters(&self) -> &[Parameter<E::Settings>] {
        &self.parameters
    }

    pub fn find(&self, key: &str) -> Option<&Parameter<E::Settings>> {
        self.parameters.iter().find(|p| p.key() == key)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Current values as a fresh store.
    pub fn get_parameters(&self, effect: &E) -> CommandParameters {
        let mut parms = CommandParameters::new();
        self.get(effect, &mut parms);
        parms
    }

    /// Parse the one-line automation form and [`set`](EffectParameterMethods::set)
    /// from it. Malformed text fails without touching the settings.
    pub fn set_parameters(&self, effect: &mut E, text: &str) -> bool {
        match CommandParameters::parse(text) {
            Ok(parms) => self.set(effect, &parms),
            Err(e) => {
                log::debug!(target: "shuttle", "rejected automation text: {}", e);
                false
            }
        }
    }

    /// Check that every value in `parms` would be accepted, without assigning.
    pub fn validate(&self, effect: &mut E, parms: &dyn ParameterStore) -> bool {
        if effect.fetch_parameters().is_none() {
            return false;
        }
        let mut checker = ShuttleSetAutomation::for_validating(parms);
        self.visit(effect, &mut checker);
        checker.is_ok()
    }

    /// `Key='value' ` summary of every declared default.
    pub fn defaults_summary(&self) -> String
    where
        E::Settings: Default,
    {
        let mut scratch = E::Settings::default();
        let mut defaults = ShuttleDefaults::new();
        for p in &self.parameters {
            p.visit(&mut scratch, &mut defaults);
        }
        defaults.result
    }
}

impl<E: Effect> EffectParameterMethods<E> for CapturedParameters<E> {
    fn reset(&self, effect: &mut E) {
        let Some(settings) = effect.fetch_parameters() else {
            return;
        };
        for p in &self.parameters {
            p.reset(settings);
        }
        if let Some(post_set) = &self.post_set {
            post_set(settings, false);
        }
    }

    fn visit(&self, effect: &mut E, visitor: &mut dyn SettingsVisitor<'_>) {
        let Some(settings) = effect.fetch_parameters() else {
            return;
        };
        for p in &self.parameters {
            p.visit(settings, visitor);
        }
    }

    fn get(&self, effect: &E, parms: &mut dyn ParameterStore) {
        let Some(settings) = effect.fetch_parameters_ref() else {
            return;
        };
        for p in &self.parameters {
            p.get(settings, parms);
        }
    }

    fn set(&self, effect: &mut E, parms: &dyn ParameterStore) -> bool {
        let Some(settings) = effect.fetch_parameters() else {
            return false;
        };
        for p in &self.parameters {
            // No rollback: parameters before this one keep their new values
            if !p.set(settings, parms) {
                log::debug!(target: "shuttle", "set stopped at parameter {:?}", p.key());
                return false;
            }
        }
        match &self.post_set {
            Some(post_set) => {
                let accepted = post_set(settings, true);
                if !accepted {
                    log::warn!(target: "shuttle", "post-set hook rejected the new settings");
                }
                accepted
            }
            None => true,
        }
    }
}

impl<E: Effect> fmt::Debug for CapturedParameters<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedParameters")
            .field("parameters", &self.parameters)
            .field("post_set", &self.post_set.is_some())
            .finish()
    }
}

fn check_declaration<S>(parameters: &[Parameter<S>]) -> Result<(), DeclarationError> {
    let mut seen = HashSet::new();
    for p in parameters {
        if !seen.insert(p.key()) {
            return Err(DeclarationError::DuplicateKey(p.key()));
        }
        if !p.default_is_valid() {
            return Err(DeclarationError::DefaultOutOfRange(p.key()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttle_types::field;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Settings {
        level: i32,
    }

    struct Plain {
        settings: Option<Settings>,
    }

    impl Effect for Plain {
        type Settings = Settings;

        fn fetch_parameters(&mut self) -> Option<&mut Settings> {
            self.settings.as_mut()
        }

        fn fetch_parameters_ref(&self) -> Option<&Settings> {
            self.settings.as_ref()
        }
    }

    fn level() -> Parameter<Settings> {
        Parameter::int(field!(Settings, level), "Level", 3, 0, 10)
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = CapturedParameters::<Plain>::new(vec![level(), level()]).unwrap_err();
        assert_eq!(err, DeclarationError::DuplicateKey("Level"));
        assert_eq!(err.to_string(), "parameter key \"Level\" declared twice");
    }

    #[test]
    fn default_outside_bounds_is_rejected() {
        let bad = Parameter::int(field!(Settings, level), "Level", 11, 0, 10);
        let err = CapturedParameters::<Plain>::new(vec![bad]).unwrap_err();
        assert_eq!(err, DeclarationError::DefaultOutOfRange("Level"));
    }

    #[test]
    fn missing_settings() {
        let params = CapturedParameters::<Plain>::new(vec![level()]).unwrap();
        let mut effect = Plain { settings: None };
        params.reset(&mut effect);
        let mut parms = CommandParameters::new();
        params.get(&effect, &mut parms);
        assert!(parms.is_empty());
        assert!(!params.set(&mut effect, &parms));
        assert!(!params.validate(&mut effect, &parms));
        assert!(effect.settings.is_none());
    }

    #[test]
    fn find_by_key() {
        let params = CapturedParameters::<Plain>::new(vec![level()]).unwrap();
        assert_eq!(params.len(), 1);
        assert!(!params.is_empty());
        assert_eq!(params.find("Level").map(|p| p.key()), Some("Level"));
        assert!(params.find("Gain").is_none());
    }

    #[test]
    fn malformed_text_leaves_settings_alone() {
        let params = CapturedParameters::<Plain>::new(vec![level()]).unwrap();
        let mut effect = Plain {
            settings: Some(Settings { level: 5 }),
        };
        assert!(!params.set_parameters(&mut effect, r#"Level="7"#));
        assert_eq!(effect.settings, Some(Settings { level: 5 }));
        assert!(params.set_parameters(&mut effect, "Level=7"));
        assert_eq!(effect.settings, Some(Settings { level: 7 }));
    }

    #[test]
    fn debug_lists_keys() {
        let params = CapturedParameters::<Plain>::new(vec![level()]).unwrap();
        let text = format!("{:?}", params);
        assert!(text.contains("Level"));
        assert!(text.contains("post_set: false"));
    }
}
