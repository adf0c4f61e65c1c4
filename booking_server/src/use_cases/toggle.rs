use crate::domain::destination::Destination;

// Which destination the page currently features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestinationToggle {
    active: Destination,
}

impl DestinationToggle {
    pub fn new(initial: Destination) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Destination {
        self.active
    }

    pub fn select(&mut self, destination: Destination) {
        self.active = destination;
    }

    pub fn alternate(&mut self) -> Destination {
        self.active = self.active.other();
        self.active
    }
}

// Cyclic cursor over a fixed list.
#[derive(Debug)]
pub struct Carousel<T: 'static> {
    items: &'static [T],
    index: usize,
}

impl<T: 'static> Carousel<T> {
    pub fn new(items: &'static [T]) -> Self {
        Self { items, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'static T> {
        self.items.get(self.index)
    }

    // An empty carousel never moves.
    pub fn advance(&mut self) -> Option<&'static T> {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
        self.current()
    }

    // Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.index = index;
        true
    }
}
