//! Window and monitor rectangles.
use std::fmt;

/// A rectangle in root coordinates. x,y from top left.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Xyhw {
    pub x: i32,
    pub y: i32,
    pub h: i32,
    pub w: i32,
}

impl fmt::Debug for Xyhw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

impl Xyhw {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, h, w }
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Returns a copy of `self` moved so that it is centered inside `container`.
    #[must_use]
    pub const fn centered_in(&self, container: &Self) -> Self {
        Self {
            x: container.x + (container.w - self.w) / 2,
            y: container.y + (container.h - self.h) / 2,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_point_excludes_far_edges() {
        let rect = Xyhw::new(100, 100, 50, 50);
        assert!(rect.contains_point(100, 100));
        assert!(rect.contains_point(149, 149));
        assert!(!rect.contains_point(150, 120));
        assert!(!rect.contains_point(99, 120));
    }

    #[test]
    fn centering_keeps_the_size() {
        let monitor = Xyhw::new(1920, 0, 1920, 1080);
        let dialog = Xyhw::new(0, 0, 400, 200).centered_in(&monitor);
        assert_eq!(dialog, Xyhw::new(2680, 440, 400, 200));
    }
}
