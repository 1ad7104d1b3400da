use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PixelPoint;
use crate::element::{AttributeKey, COLOR_KEYS, ChartElement, Element, HitTest};

/// Elements that can be hovered: hit-tested, highlighted and reset.
pub trait Hoverable {
    fn in_range(&self, x: f64, y: f64) -> bool;
    fn tooltip_position(&self) -> PixelPoint;
    fn restore_keys(&mut self, keys: &[AttributeKey]);
    fn highlight(&mut self);
}

impl<S: HitTest> Hoverable for Element<S> {
    fn in_range(&self, x: f64, y: f64) -> bool {
        Element::in_range(self, x, y)
    }

    fn tooltip_position(&self) -> PixelPoint {
        Element::tooltip_position(self)
    }

    fn restore_keys(&mut self, keys: &[AttributeKey]) {
        self.restore(Some(keys));
    }

    fn highlight(&mut self) {
        Element::highlight(self);
    }
}

impl Hoverable for ChartElement {
    fn in_range(&self, x: f64, y: f64) -> bool {
        ChartElement::in_range(self, x, y)
    }

    fn tooltip_position(&self) -> PixelPoint {
        ChartElement::tooltip_position(self)
    }

    fn restore_keys(&mut self, keys: &[AttributeKey]) {
        self.restore(Some(keys));
    }

    fn highlight(&mut self) {
        ChartElement::highlight(self);
    }
}

/// Which elements the pointer currently covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverState {
    active: Vec<usize>,
}

impl HoverState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes of the highlighted elements, in element order.
    #[must_use]
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Resets every element's colours, highlights the ones under `(x, y)`
    /// and returns whether the active set changed.
    pub fn update<E: Hoverable>(&mut self, elements: &mut [E], x: f64, y: f64) -> bool {
        for element in elements.iter_mut() {
            element.restore_keys(&COLOR_KEYS);
        }

        let active: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.in_range(x, y))
            .map(|(index, _)| index)
            .collect();

        for &index in &active {
            elements[index].highlight();
        }

        let changed = active != self.active;
        if changed {
            debug!(x, y, active = active.len(), "hover set changed");
        }
        self.active = active;
        changed
    }

    /// Restores colours and forgets the active set (pointer left the canvas).
    pub fn clear<E: Hoverable>(&mut self, elements: &mut [E]) -> bool {
        for element in elements.iter_mut() {
            element.restore_keys(&COLOR_KEYS);
        }
        let changed = !self.active.is_empty();
        self.active.clear();
        changed
    }

    /// Mean tooltip anchor of the active elements.
    #[must_use]
    pub fn tooltip_anchor<E: Hoverable>(&self, elements: &[E]) -> Option<PixelPoint> {
        let anchors: Vec<PixelPoint> = self
            .active
            .iter()
            .filter_map(|&index| elements.get(index))
            .map(Hoverable::tooltip_position)
            .collect();
        if anchors.is_empty() {
            return None;
        }
        let count = anchors.len() as f64;
        let (sum_x, sum_y) = anchors
            .iter()
            .fold((0.0, 0.0), |(x, y), anchor| (x + anchor.x, y + anchor.y));
        Some(PixelPoint::new(sum_x / count, sum_y / count))
    }
}
