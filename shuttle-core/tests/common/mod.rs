//! Sample effects shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use shuttle_core::{CapturedParameters, Effect, Parameter};
use shuttle_types::{field, EnumValueSymbol};

pub const MODES: &[EnumValueSymbol] = &[
    EnumValueSymbol::with_display("Fast", "Fast attack"),
    EnumValueSymbol::with_display("Slow", "Slow attack"),
];

/// Same names as [`MODES`], reordered and extended.
pub const MODES_REORDERED: &[EnumValueSymbol] = &[
    EnumValueSymbol::new("Slow"),
    EnumValueSymbol::new("Medium"),
    EnumValueSymbol::new("Fast"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmplifySettings {
    pub gain: f32,
    pub mode: usize,
    /// Derived by the post-set hook
    pub linear: f32,
}

pub struct Amplify {
    pub settings: AmplifySettings,
}

impl Amplify {
    pub fn new() -> Self {
        Self {
            settings: AmplifySettings {
                gain: 3.0,
                mode: 1,
                linear: 0.0,
            },
        }
    }
}

impl Effect for Amplify {
    type Settings = AmplifySettings;

    fn fetch_parameters(&mut self) -> Option<&mut AmplifySettings> {
        Some(&mut self.settings)
    }

    fn fetch_parameters_ref(&self) -> Option<&AmplifySettings> {
        Some(&self.settings)
    }
}

pub fn amplify_parameters() -> CapturedParameters<Amplify> {
    CapturedParameters::new(vec![
        Parameter::float(field!(AmplifySettings, gain), "Gain", 0.0, -24.0, 24.0),
        Parameter::enumeration(field!(AmplifySettings, mode), "Mode", 0, MODES),
    ])
    .expect("valid declaration")
}

pub fn amplify_parameters_reordered() -> CapturedParameters<Amplify> {
    CapturedParameters::new(vec![
        Parameter::float(field!(AmplifySettings, gain), "Gain", 0.0, -24.0, 24.0),
        Parameter::enumeration(field!(AmplifySettings, mode), "Mode", 2, MODES_REORDERED),
    ])
    .expect("valid declaration")
}

/// Hook derives `linear` from `gain`, rejects boosts in slow mode, and counts
/// its calls.
pub fn amplify_with_hook(calls: Arc<AtomicUsize>) -> CapturedParameters<Amplify> {
    CapturedParameters::with_post_set(
        vec![
            Parameter::float(field!(AmplifySettings, gain), "Gain", 0.0, -24.0, 24.0),
            Parameter::enumeration(field!(AmplifySettings, mode), "Mode", 0, MODES),
        ],
        move |s: &mut AmplifySettings, _updating| {
            calls.fetch_add(1, Ordering::SeqCst);
            s.linear = 10f32.powf(s.gain / 20.0);
            !(s.mode == 1 && s.gain > 0.0)
        },
    )
    .expect("valid declaration")
}

pub const CURVES: &[EnumValueSymbol] = &[
    EnumValueSymbol::new("Linear"),
    EnumValueSymbol::new("Exponential"),
];

/// One field of every kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EchoSettings {
    pub enabled: bool,
    pub taps: i32,
    pub buffer: usize,
    pub decay: f32,
    pub delay: f64,
    pub label: String,
    pub curve: usize,
}

pub struct Echo {
    pub settings: EchoSettings,
}

impl Effect for Echo {
    type Settings = EchoSettings;

    fn fetch_parameters(&mut self) -> Option<&mut EchoSettings> {
        Some(&mut self.settings)
    }

    fn fetch_parameters_ref(&self) -> Option<&EchoSettings> {
        Some(&self.settings)
    }
}

pub fn echo_parameters() -> CapturedParameters<Echo> {
    CapturedParameters::new(vec![
        Parameter::flag(field!(EchoSettings, enabled), "Enabled", true),
        Parameter::int(field!(EchoSettings, taps), "Taps", 2, 1, 8),
        Parameter::size(field!(EchoSettings, buffer), "Buffer", 1024, 64, 65536),
        Parameter::float(field!(EchoSettings, decay), "Decay", 0.5, 0.0, 1.0).with_scale(100.0),
        Parameter::double(field!(EchoSettings, delay), "Delay", 1.0, 0.001, 10.0).with_scale(1000.0),
        Parameter::text(field!(EchoSettings, label), "Label", "echo"),
        Parameter::enumeration(field!(EchoSettings, curve), "Curve", 1, CURVES),
    ])
    .expect("valid declaration")
}

/// An effect that currently has no parameter structure.
pub struct Bypass;

impl Effect for Bypass {
    type Settings = AmplifySettings;

    fn fetch_parameters(&mut self) -> Option<&mut AmplifySettings> {
        None
    }

    fn fetch_parameters_ref(&self) -> Option<&AmplifySettings> {
        None
    }
}
