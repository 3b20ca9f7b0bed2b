// Neokeys Layer State
// Layer identifiers and the store that tracks which layers are engaged

use std::fmt;

/// A keymap layer index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Layer(pub u8);

impl Layer {
    /// The permanent base layer
    pub const BASE: Layer = Layer(0);
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

/// The layer store the engine drives.
///
/// Priority resolution belongs to the store; the engine only switches layers on and off.
pub trait LayerState {
    fn activate(&mut self, layer: Layer);
    fn deactivate(&mut self, layer: Layer);
    fn is_active(&self, layer: Layer) -> bool;
    /// Highest engaged layer
    fn topmost(&self) -> Layer;
}

/// Bitmask layer store with up to 32 layers, the highest set bit wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSet {
    bits: u32,
}

impl LayerSet {
    pub const MAX_LAYERS: u8 = 32;

    pub fn new() -> Self {
        Self {
            bits: 1 << Layer::BASE.0,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Engaged layers, lowest first
    pub fn active_layers(&self) -> Vec<Layer> {
        (0..Self::MAX_LAYERS)
            .filter(|n| self.bits & (1 << n) != 0)
            .map(Layer)
            .collect()
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerState for LayerSet {
    fn activate(&mut self, layer: Layer) {
        if layer.0 >= Self::MAX_LAYERS {
            log::warn!("ignoring activation of out-of-range {}", layer);
            return;
        }
        self.bits |= 1 << layer.0;
    }

    fn deactivate(&mut self, layer: Layer) {
        if layer == Layer::BASE || layer.0 >= Self::MAX_LAYERS {
            return;
        }
        self.bits &= !(1 << layer.0);
    }

    fn is_active(&self, layer: Layer) -> bool {
        layer.0 < Self::MAX_LAYERS && self.bits & (1 << layer.0) != 0
    }

    fn topmost(&self) -> Layer {
        Layer((31 - self.bits.leading_zeros()) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_only_base() {
        let layers = LayerSet::new();
        assert!(layers.is_active(Layer::BASE));
        assert_eq!(layers.topmost(), Layer::BASE);
        assert_eq!(layers.active_layers(), vec![Layer::BASE]);
    }

    #[test]
    fn test_topmost_is_highest_active() {
        let mut layers = LayerSet::new();
        layers.activate(Layer(1));
        layers.activate(Layer(5));
        assert_eq!(layers.topmost(), Layer(5));

        layers.deactivate(Layer(5));
        assert_eq!(layers.topmost(), Layer(1));
    }

    #[test]
    fn test_base_layer_is_permanent() {
        let mut layers = LayerSet::new();
        layers.deactivate(Layer::BASE);
        assert!(layers.is_active(Layer::BASE));
    }

    #[test]
    fn test_out_of_range_layer_ignored() {
        let mut layers = LayerSet::new();
        layers.activate(Layer(40));
        assert!(!layers.is_active(Layer(40)));
        assert_eq!(layers.bits(), 1);
    }
}
