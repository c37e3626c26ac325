//! The animation back end contract and a recording implementation.
//!
//! Hosts implement [`AnimationDriver`] on top of their tween library. The
//! [`RecordingDriver`] keeps every call in memory and can sample where each
//! node would be at a given time, which is what tests and the `simulate`
//! command use.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::animation::{apply_easing, lerp};
use super::{Property, PropertySet, Timing, TweenVars};
use crate::masonry::nodes::NodeId;

/// Opaque handle to a tween started by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TweenHandle(pub u64);

/// Tween back end the engine issues commands to.
///
/// Calls are fire-and-forget: playback is advanced by the host, never awaited.
pub trait AnimationDriver {
    /// Starts a tween with explicit start and end values.
    fn from_to(&mut self, node: NodeId, from: &TweenVars, to: &TweenVars, timing: &Timing)
    -> TweenHandle;

    /// Starts a tween from the node's current values.
    fn to(&mut self, node: NodeId, to: &TweenVars, timing: &Timing) -> TweenHandle;

    /// Stops a tween, or only some of its properties. Properties stop at their
    /// current value.
    fn kill(&mut self, handle: TweenHandle, properties: Option<&[Property]>);
}

// ============================================================================
// Recording Driver
// ============================================================================

/// One call received by a [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum DriverCall {
    FromTo {
        handle: TweenHandle,
        node: NodeId,
        from: TweenVars,
        to: TweenVars,
        timing: Timing,
        /// Driver clock when the call arrived, in seconds.
        at: f64,
    },
    To {
        handle: TweenHandle,
        node: NodeId,
        to: TweenVars,
        timing: Timing,
        at: f64,
    },
    Kill {
        handle: TweenHandle,
        properties: Option<Vec<Property>>,
        at: f64,
    },
}

impl DriverCall {
    /// Target node for tween calls, `None` for kills.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::FromTo { node, .. } | Self::To { node, .. } => Some(*node),
            Self::Kill { .. } => None,
        }
    }

    /// Whether this call started a tween.
    #[must_use]
    pub const fn is_tween(&self) -> bool { !matches!(self, Self::Kill { .. }) }
}

/// A tween as the recording driver models it.
#[derive(Debug, Clone)]
struct RecordedTween {
    node: NodeId,
    /// `(property, start, end)` for properties still animated by this tween.
    tracks: Vec<(Property, f64, f64)>,
    timing: Timing,
    started_at: f64,
}

impl RecordedTween {
    fn value_at(&self, property: Property, time: f64) -> Option<f64> {
        let (_, start, end) = self.tracks.iter().find(|(p, _, _)| *p == property)?;
        let elapsed = time - self.started_at - self.timing.delay;
        let progress = if self.timing.duration <= 0.0 {
            if elapsed >= 0.0 { 1.0 } else { 0.0 }
        } else {
            elapsed / self.timing.duration
        };
        Some(lerp(*start, *end, apply_easing(progress, self.timing.easing)))
    }
}

#[derive(Debug, Default)]
struct RecorderInner {
    next_handle: u64,
    clock: f64,
    calls: Vec<DriverCall>,
    /// Tweens in start order.
    tweens: Vec<(TweenHandle, RecordedTween)>,
    /// Values frozen by kills, per node and property.
    resting: HashMap<(NodeId, Property), f64>,
}

impl RecorderInner {
    fn allocate(&mut self) -> TweenHandle {
        self.next_handle += 1;
        TweenHandle(self.next_handle)
    }

    fn sample(&self, node: NodeId, property: Property, time: f64) -> Option<f64> {
        self.tweens
            .iter()
            .rev()
            .filter(|(_, tween)| tween.node == node)
            .find_map(|(_, tween)| tween.value_at(property, time))
            .or_else(|| self.resting.get(&(node, property)).copied())
    }

    fn start(&mut self, node: NodeId, tracks: Vec<(Property, f64, f64)>, timing: Timing) -> TweenHandle {
        let handle = self.allocate();
        let started_at = self.clock;
        self.tweens.push((handle, RecordedTween { node, tracks, timing, started_at }));
        handle
    }

    fn kill(&mut self, handle: TweenHandle, properties: Option<&[Property]>) {
        let clock = self.clock;
        let Some(index) = self.tweens.iter().position(|(h, _)| *h == handle) else {
            return;
        };

        let (_, tween) = &self.tweens[index];
        let node = tween.node;
        let frozen: Vec<(Property, f64)> = tween
            .tracks
            .iter()
            .filter(|(p, _, _)| properties.is_none_or(|props| props.contains(p)))
            .filter_map(|(p, _, _)| tween.value_at(*p, clock).map(|v| (*p, v)))
            .collect();

        for (property, value) in frozen {
            self.resting.insert((node, property), value);
        }

        match properties {
            None => {
                self.tweens.remove(index);
            }
            Some(props) => {
                let tween = &mut self.tweens[index].1;
                tween.tracks.retain(|(p, _, _)| !props.contains(p));
                if tween.tracks.is_empty() {
                    self.tweens.remove(index);
                }
            }
        }
    }
}

/// Driver that records calls and models tween playback.
///
/// Clones share the same log, so a test can keep one clone while the engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    inner: Arc<Mutex<RecorderInner>>,
}

impl RecordingDriver {
    /// Creates an empty recorder with its clock at zero.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Moves the driver clock. Later tweens start at this time.
    pub fn advance_to(&self, seconds: f64) {
        let mut inner = self.inner.lock();
        inner.clock = inner.clock.max(seconds);
    }

    /// Current driver clock in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 { self.inner.lock().clock }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> { self.inner.lock().calls.clone() }

    /// Number of tween-starting calls received so far.
    #[must_use]
    pub fn tween_count(&self) -> usize { self.inner.lock().calls.iter().filter(|c| c.is_tween()).count() }

    /// Tween calls targeting one node.
    #[must_use]
    pub fn calls_for(&self, node: NodeId) -> Vec<DriverCall> {
        self.inner.lock().calls.iter().filter(|c| c.node() == Some(node)).cloned().collect()
    }

    /// Handles of tweens with at least one property still animated.
    #[must_use]
    pub fn live_handles(&self) -> Vec<TweenHandle> {
        self.inner.lock().tweens.iter().map(|(h, _)| *h).collect()
    }

    /// Properties a tween still animates, `None` if it was killed.
    #[must_use]
    pub fn live_properties(&self, handle: TweenHandle) -> Option<PropertySet> {
        self.inner
            .lock()
            .tweens
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, tween)| tween.tracks.iter().map(|(p, _, _)| *p).collect())
    }

    /// Value of a node property at a time, `None` if nothing ever set it.
    #[must_use]
    pub fn sample(&self, node: NodeId, property: Property, seconds: f64) -> Option<f64> {
        self.inner.lock().sample(node, property, seconds)
    }
}

impl AnimationDriver for RecordingDriver {
    fn from_to(
        &mut self,
        node: NodeId,
        from: &TweenVars,
        to: &TweenVars,
        timing: &Timing,
    ) -> TweenHandle {
        let mut inner = self.inner.lock();
        let at = inner.clock;
        let tracks = to
            .iter()
            .map(|(property, end)| {
                let start = from
                    .get(property)
                    .or_else(|| inner.sample(node, property, at))
                    .unwrap_or(end);
                (property, start, end)
            })
            .collect();
        let handle = inner.start(node, tracks, *timing);
        inner.calls.push(DriverCall::FromTo {
            handle,
            node,
            from: from.clone(),
            to: to.clone(),
            timing: *timing,
            at,
        });
        handle
    }

    fn to(&mut self, node: NodeId, to: &TweenVars, timing: &Timing) -> TweenHandle {
        let mut inner = self.inner.lock();
        let at = inner.clock;
        let tracks = to
            .iter()
            .map(|(property, end)| {
                let start = inner.sample(node, property, at).unwrap_or(end);
                (property, start, end)
            })
            .collect();
        let handle = inner.start(node, tracks, *timing);
        inner.calls.push(DriverCall::To { handle, node, to: to.clone(), timing: *timing, at });
        handle
    }

    fn kill(&mut self, handle: TweenHandle, properties: Option<&[Property]>) {
        let mut inner = self.inner.lock();
        let at = inner.clock;
        inner.kill(handle, properties);
        inner.calls.push(DriverCall::Kill {
            handle,
            properties: properties.map(<[Property]>::to_vec),
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    fn linear(duration: f64) -> Timing { Timing::new(duration, EasingType::Linear) }

    #[test]
    fn test_from_to_samples_linearly() {
        let mut driver = RecordingDriver::new();
        let node = NodeId(1);
        driver.from_to(
            node,
            &TweenVars::new().with(Property::X, 0.0),
            &TweenVars::new().with(Property::X, 100.0),
            &linear(1.0),
        );

        assert_eq!(driver.sample(node, Property::X, 0.0), Some(0.0));
        assert_eq!(driver.sample(node, Property::X, 0.5), Some(50.0));
        assert_eq!(driver.sample(node, Property::X, 3.0), Some(100.0));
        assert_eq!(driver.sample(node, Property::Y, 0.5), None);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut driver = RecordingDriver::new();
        let node = NodeId(1);
        driver.from_to(
            node,
            &TweenVars::new().with(Property::Opacity, 0.0),
            &TweenVars::new().with(Property::Opacity, 1.0),
            &linear(1.0).delayed(0.5),
        );
        assert_eq!(driver.sample(node, Property::Opacity, 0.25), Some(0.0));
        assert_eq!(driver.sample(node, Property::Opacity, 1.0), Some(0.5));
    }

    #[test]
    fn test_to_starts_from_current_value() {
        let mut driver = RecordingDriver::new();
        let node = NodeId(7);
        let first = driver.from_to(
            node,
            &TweenVars::new().with(Property::X, 0.0),
            &TweenVars::new().with(Property::X, 100.0),
            &linear(1.0),
        );
        driver.advance_to(0.5);
        driver.kill(first, Some(&[Property::X]));
        driver.to(node, &TweenVars::new().with(Property::X, 0.0), &linear(1.0));

        assert_eq!(driver.sample(node, Property::X, 0.5), Some(50.0));
        assert_eq!(driver.sample(node, Property::X, 1.0), Some(25.0));
        assert_eq!(driver.sample(node, Property::X, 1.5), Some(0.0));
    }

    #[test]
    fn test_partial_kill_keeps_other_properties() {
        let mut driver = RecordingDriver::new();
        let node = NodeId(2);
        let handle = driver.from_to(
            node,
            &TweenVars::new().with(Property::X, 0.0).with(Property::Opacity, 0.0),
            &TweenVars::new().with(Property::X, 10.0).with(Property::Opacity, 1.0),
            &linear(1.0),
        );
        driver.kill(handle, Some(&[Property::Opacity]));

        let live = driver.live_properties(handle).unwrap();
        assert_eq!(live.as_slice(), &[Property::X]);

        driver.kill(handle, Some(&[Property::X]));
        assert!(driver.live_properties(handle).is_none());
        assert!(driver.live_handles().is_empty());
    }

    #[test]
    fn test_clones_share_log() {
        let observer = RecordingDriver::new();
        let mut engine_side = observer.clone();
        engine_side.to(NodeId(1), &TweenVars::new().with(Property::Scale, 0.97), &linear(0.3));
        assert_eq!(observer.tween_count(), 1);
        assert_eq!(observer.calls_for(NodeId(1)).len(), 1);
    }
}
