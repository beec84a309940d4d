//! Raw pointer events and coordinate normalization.
//!
//! Pointer events arrive in *client* coordinates, shaped by the input
//! modality the platform delivers (a mouse event carries one position, a
//! touch event a list of contact points). [`extract_point`] is the single
//! place that folds both shapes into one surface-relative point.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// How the platform delivers pointer input.
///
/// Classified once at startup from a platform descriptor string and immutable
/// afterwards. The classification is a heuristic, not a guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    /// Pointer events carry a direct position (desktop)
    #[default]
    Mouse,
    /// Pointer events carry a list of contact points (mobile)
    Touch,
}

/// Substrings that mark a platform descriptor as touch-driven.
const TOUCH_MARKERS: [&str; 5] = ["iPhone", "iPad", "iPod", "Android", "Mobile"];

impl Modality {
    /// Classifies a platform descriptor string into a modality.
    ///
    /// Any descriptor mentioning a known mobile platform is treated as
    /// touch-driven; everything else (including an empty descriptor) is
    /// mouse-driven.
    pub fn classify(descriptor: &str) -> Self {
        if TOUCH_MARKERS.iter().any(|m| descriptor.contains(m)) {
            Modality::Touch
        } else {
            Modality::Mouse
        }
    }
}

/// A position in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

/// A raw pointer event as the platform delivers it.
///
/// The two variants mirror the two event shapes the platform produces; which
/// one a given installation sees is fixed by its [`Modality`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointerEvent {
    /// Mouse-shaped event: one direct position
    Mouse { x: f64, y: f64 },
    /// Touch-shaped event: ordered contact points, first one is primary
    Touch { touches: Vec<ClientPoint> },
}

/// The surface's placement within the client coordinate space.
///
/// Captured at startup and re-captured on resize; subtracting it converts
/// client coordinates to surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Client X of the surface's left edge
    pub left: f64,
    /// Client Y of the surface's top edge
    pub top: f64,
}

/// Normalizes a raw pointer event to a surface-relative point.
///
/// Dispatches on the modality enum, never on the event's shape: under Mouse
/// the direct position is used, under Touch the first contact point. An event
/// whose shape does not match the active modality yields `None` and is
/// dropped by the caller.
///
/// This is the one normalization path for both modalities; for an identical
/// on-screen position, mouse and touch delivery produce the same result.
pub fn extract_point(
    event: &PointerEvent,
    modality: Modality,
    bounds: SurfaceBounds,
) -> Option<Point> {
    let client = match modality {
        Modality::Mouse => match event {
            PointerEvent::Mouse { x, y } => ClientPoint { x: *x, y: *y },
            PointerEvent::Touch { .. } => return None,
        },
        Modality::Touch => match event {
            PointerEvent::Touch { touches } => *touches.first()?,
            PointerEvent::Mouse { .. } => return None,
        },
    };
    Some(Point::new(client.x - bounds.left, client.y - bounds.top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_mobile_descriptors() {
        assert_eq!(Modality::classify("iPhone OS 17"), Modality::Touch);
        assert_eq!(Modality::classify("Android 14; Pixel"), Modality::Touch);
        assert_eq!(Modality::classify("X11; Linux x86_64"), Modality::Mouse);
        assert_eq!(Modality::classify(""), Modality::Mouse);
    }

    #[test]
    fn mouse_and_touch_delivery_normalize_identically() {
        let bounds = SurfaceBounds { left: 10.0, top: 20.0 };
        let mouse = PointerEvent::Mouse { x: 110.0, y: 220.0 };
        let touch = PointerEvent::Touch {
            touches: vec![ClientPoint { x: 110.0, y: 220.0 }],
        };

        let a = extract_point(&mouse, Modality::Mouse, bounds).unwrap();
        let b = extract_point(&touch, Modality::Touch, bounds).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Point::new(100.0, 200.0));
    }

    #[test]
    fn first_touch_point_wins() {
        let touch = PointerEvent::Touch {
            touches: vec![
                ClientPoint { x: 5.0, y: 6.0 },
                ClientPoint { x: 50.0, y: 60.0 },
            ],
        };
        let p = extract_point(&touch, Modality::Touch, SurfaceBounds::default()).unwrap();
        assert_eq!(p, Point::new(5.0, 6.0));
    }

    #[test]
    fn mismatched_shape_is_dropped() {
        let bounds = SurfaceBounds::default();
        let mouse = PointerEvent::Mouse { x: 1.0, y: 1.0 };
        let empty_touch = PointerEvent::Touch { touches: vec![] };

        assert!(extract_point(&mouse, Modality::Touch, bounds).is_none());
        assert!(extract_point(&empty_touch, Modality::Touch, bounds).is_none());
        assert!(extract_point(&empty_touch, Modality::Mouse, bounds).is_none());
    }
}
