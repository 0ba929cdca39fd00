//! Text erasure: flood-fill clearing of components classified as text.

use cityvec_core::{BitmapMut, ConnectedComponent};
use cityvec_region::erase_component;

/// Erase every component from `black_layer`, eight-connected flood fill
/// starting at each component's seed pixel.
pub fn erase_text(components: &[ConnectedComponent], black_layer: &mut BitmapMut) {
    for component in components {
        erase_component(black_layer, component.seed);
    }
}
