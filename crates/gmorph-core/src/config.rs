#![forbid(unsafe_code)]

//! Transition timing and scene configuration.

use std::time::Duration;

use crate::easing::Easing;

/// Timing and layout constants for generation transitions.
///
/// Durations follow the reference choreography: node fades and the
/// move/resize phase run at 300 ms, edge fades at half that, so edges
/// drop out before nodes finish vanishing and reappear after the new
/// structure has settled in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionConfig {
    /// Duration of node opacity fades (vanish and appear phases).
    pub node_fade: Duration,
    /// Duration of edge opacity fades (both phases).
    pub edge_fade: Duration,
    /// Duration of the move/resize phase for remaining nodes.
    pub move_resize: Duration,
    /// Margin added around the displayed generation's bounding box when
    /// computing the visible scene rectangle.
    pub scene_margin: f32,
    /// Grid cell used to raster-align the scene centering offset.
    pub raster_cell: f32,
    /// Easing applied to every tween.
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            node_fade: Duration::from_millis(300),
            edge_fade: Duration::from_millis(150),
            move_resize: Duration::from_millis(300),
            scene_margin: 25.0,
            raster_cell: 15.0,
            easing: Easing::Linear,
        }
    }
}

impl TransitionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with zero durations: every transition completes
    /// on its first tick. For tests and reduced-motion hosts.
    pub fn instant() -> Self {
        Self {
            node_fade: Duration::ZERO,
            edge_fade: Duration::ZERO,
            move_resize: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the node fade duration.
    #[must_use]
    pub fn node_fade(mut self, duration: Duration) -> Self {
        self.node_fade = duration;
        self
    }

    /// Set the edge fade duration.
    #[must_use]
    pub fn edge_fade(mut self, duration: Duration) -> Self {
        self.edge_fade = duration;
        self
    }

    /// Set the move/resize duration.
    #[must_use]
    pub fn move_resize(mut self, duration: Duration) -> Self {
        self.move_resize = duration;
        self
    }

    /// Set the scene margin.
    #[must_use]
    pub fn scene_margin(mut self, margin: f32) -> Self {
        self.scene_margin = margin;
        self
    }

    /// Set the raster cell for centering alignment.
    #[must_use]
    pub fn raster_cell(mut self, cell: f32) -> Self {
        self.raster_cell = cell;
        self
    }

    /// Set the tween easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionConfig;
    use crate::easing::Easing;
    use std::time::Duration;

    #[test]
    fn defaults_match_reference_choreography() {
        let config = TransitionConfig::default();
        assert_eq!(config.node_fade, Duration::from_millis(300));
        assert_eq!(config.edge_fade, Duration::from_millis(150));
        assert_eq!(config.move_resize, Duration::from_millis(300));
        assert_eq!(config.scene_margin, 25.0);
        assert_eq!(config.easing, Easing::Linear);
    }

    #[test]
    fn instant_zeroes_all_durations() {
        let config = TransitionConfig::instant();
        assert_eq!(config.node_fade, Duration::ZERO);
        assert_eq!(config.edge_fade, Duration::ZERO);
        assert_eq!(config.move_resize, Duration::ZERO);
        assert_eq!(config.scene_margin, 25.0);
    }

    #[test]
    fn builder_overrides() {
        let config = TransitionConfig::new()
            .node_fade(Duration::from_millis(100))
            .edge_fade(Duration::from_millis(50))
            .move_resize(Duration::from_millis(200))
            .scene_margin(10.0)
            .raster_cell(5.0)
            .easing(Easing::EaseInOut);
        assert_eq!(config.node_fade, Duration::from_millis(100));
        assert_eq!(config.edge_fade, Duration::from_millis(50));
        assert_eq!(config.move_resize, Duration::from_millis(200));
        assert_eq!(config.scene_margin, 10.0);
        assert_eq!(config.raster_cell, 5.0);
        assert_eq!(config.easing, Easing::EaseInOut);
    }
}
