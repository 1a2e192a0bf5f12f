/// Tracks a discrete value across report cycles and exposes its transitions.
///
/// `rising` and `falling` hold the sentinel on every cycle where the value did
/// not change, so a transition is visible for exactly one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<T> {
    state: T,
    rising: T,
    falling: T,
    previous: T,
    sentinel: T,
}

impl<T: Copy + PartialEq> Edge<T> {
    /// Create a holder whose every projection starts at `sentinel`.
    pub fn new(sentinel: T) -> Self {
        Self {
            state: sentinel,
            rising: sentinel,
            falling: sentinel,
            previous: sentinel,
            sentinel,
        }
    }

    pub fn update(&mut self, value: T) {
        if value == self.state {
            self.rising = self.sentinel;
            self.falling = self.sentinel;
            return;
        }

        self.falling = self.state;
        self.previous = self.state;
        self.rising = value;
        self.state = value;
    }

    /// Current value.
    pub fn state(&self) -> T {
        self.state
    }

    /// Value entered on the last update, or the sentinel.
    pub fn rising(&self) -> T {
        self.rising
    }

    /// Value left on the last update, or the sentinel.
    pub fn falling(&self) -> T {
        self.falling
    }

    /// Value held before the current one. Survives updates without an edge.
    pub fn previous(&self) -> T {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::Edge;

    const NONE: u8 = 0;

    #[test]
    fn starts_without_edges() {
        let edge = Edge::new(NONE);
        assert_eq!(edge.state(), NONE);
        assert_eq!(edge.rising(), NONE);
        assert_eq!(edge.falling(), NONE);
        assert_eq!(edge.previous(), NONE);
    }

    #[test]
    fn reports_transition_once() {
        let mut edge = Edge::new(NONE);
        edge.update(1);
        assert_eq!(edge.state(), 1);
        assert_eq!(edge.rising(), 1);
        assert_eq!(edge.falling(), NONE);

        edge.update(2);
        assert_eq!(edge.rising(), 2);
        assert_eq!(edge.falling(), 1);
        assert_eq!(edge.previous(), 1);

        // same value again -> both edges collapse
        edge.update(2);
        assert_eq!(edge.state(), 2);
        assert_eq!(edge.rising(), NONE);
        assert_eq!(edge.falling(), NONE);
        assert_eq!(edge.previous(), 1);
    }

    #[test]
    fn leaving_to_sentinel_is_a_falling_edge() {
        let mut edge = Edge::new(NONE);
        edge.update(3);
        edge.update(NONE);
        assert_eq!(edge.falling(), 3);
        assert_eq!(edge.rising(), NONE);
        assert_eq!(edge.previous(), 3);
    }
}
