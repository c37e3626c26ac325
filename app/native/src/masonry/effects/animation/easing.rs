//! Easing functions for time-based tweens.
//!
//! Curves follow the GSAP families: `power1`..`power4` (quad through quint),
//! `sine`, `expo` and `back`, each in `in`, `out` and `inOut` flavours.

use std::f64::consts::PI;

use crate::config::EasingType;

// ============================================================================
// Easing Functions
// ============================================================================

/// Overshoot used by the `back` family.
const BACK_OVERSHOOT: f64 = 1.70158;

/// Linear interpolation between two values.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 { (end - start).mul_add(t, start) }

/// Polynomial ease-in of the given degree.
#[inline]
fn power_in(t: f64, degree: i32) -> f64 { t.powi(degree) }

/// Polynomial ease-out of the given degree.
#[inline]
fn power_out(t: f64, degree: i32) -> f64 { 1.0 - (1.0 - t).powi(degree) }

/// Polynomial ease-in-out of the given degree.
#[inline]
fn power_in_out(t: f64, degree: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(degree) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(degree) / 2.0
    }
}

#[inline]
fn sine_in(t: f64) -> f64 { 1.0 - (t * PI / 2.0).cos() }

#[inline]
fn sine_out(t: f64) -> f64 { (t * PI / 2.0).sin() }

#[inline]
fn sine_in_out(t: f64) -> f64 { -((PI * t).cos() - 1.0) / 2.0 }

#[inline]
fn expo_in(t: f64) -> f64 { if t <= 0.0 { 0.0 } else { 2f64.powf(10.0 * (t - 1.0)) } }

#[inline]
fn expo_out(t: f64) -> f64 { if t >= 1.0 { 1.0 } else { 1.0 - 2f64.powf(-10.0 * t) } }

fn expo_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0f64.mul_add(t, -10.0)) / 2.0
    } else {
        (2.0 - 2f64.powf((-20.0f64).mul_add(t, 10.0))) / 2.0
    }
}

#[inline]
fn back_in(t: f64) -> f64 { (BACK_OVERSHOOT + 1.0) * t * t * t - BACK_OVERSHOOT * t * t }

#[inline]
fn back_out(t: f64) -> f64 {
    let t1 = t - 1.0;
    (BACK_OVERSHOOT + 1.0).mul_add(t1 * t1 * t1, 1.0) + BACK_OVERSHOOT * t1 * t1
}

fn back_in_out(t: f64) -> f64 {
    let c2 = BACK_OVERSHOOT * 1.525;
    if t < 0.5 {
        let t2 = 2.0 * t;
        (t2 * t2 * ((c2 + 1.0) * t2 - c2)) / 2.0
    } else {
        let t2 = 2.0f64.mul_add(t, -2.0);
        (t2 * t2).mul_add((c2 + 1.0) * t2 + c2, 2.0) / 2.0
    }
}

/// Applies an easing curve to a progress value.
///
/// Progress is clamped to `0.0..=1.0`, so callers can pass raw elapsed ratios.
#[must_use]
pub fn apply_easing(t: f64, easing: EasingType) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        EasingType::Linear => t,
        EasingType::Power1In => power_in(t, 2),
        EasingType::Power1Out => power_out(t, 2),
        EasingType::Power1InOut => power_in_out(t, 2),
        EasingType::Power2In => power_in(t, 3),
        EasingType::Power2Out => power_out(t, 3),
        EasingType::Power2InOut => power_in_out(t, 3),
        EasingType::Power3In => power_in(t, 4),
        EasingType::Power3Out => power_out(t, 4),
        EasingType::Power3InOut => power_in_out(t, 4),
        EasingType::Power4In => power_in(t, 5),
        EasingType::Power4Out => power_out(t, 5),
        EasingType::Power4InOut => power_in_out(t, 5),
        EasingType::SineIn => sine_in(t),
        EasingType::SineOut => sine_out(t),
        EasingType::SineInOut => sine_in_out(t),
        EasingType::ExpoIn => expo_in(t),
        EasingType::ExpoOut => expo_out(t),
        EasingType::ExpoInOut => expo_in_out(t),
        EasingType::BackIn => back_in(t),
        EasingType::BackOut => back_out(t),
        EasingType::BackInOut => back_in_out(t),
    }
}

// ============================================================================
// Tests
// ============================================================================
