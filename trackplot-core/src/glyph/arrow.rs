//! Arrow-head paths shared by the glyph variants

use crate::surface::ShapePath;

/// Direction an arrow head points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    East,
    West,
}

/// Closed arrow-head path with its tip at `(tip_x, tip_y)`.
///
/// North arrows spread `reach` pixels to each side of the tip and extend `depth` pixels
/// downwards; east/west arrows extend `reach` pixels back from the tip and span `depth`
/// pixels vertically, centred on the tip.
pub fn arrow_path(heading: Heading, tip_x: f64, tip_y: f64, reach: f64, depth: f64) -> ShapePath {
    match heading {
        Heading::North => ShapePath::new()
            .move_to(tip_x, tip_y)
            .line_to(tip_x + reach, tip_y + depth)
            .line_to(tip_x - reach, tip_y + depth)
            .close(),
        Heading::East => ShapePath::new()
            .move_to(tip_x, tip_y)
            .line_to(tip_x - reach, tip_y - depth / 2.0)
            .line_to(tip_x - reach, tip_y + depth / 2.0)
            .close(),
        Heading::West => ShapePath::new()
            .move_to(tip_x, tip_y)
            .line_to(tip_x + reach, tip_y - depth / 2.0)
            .line_to(tip_x + reach, tip_y + depth / 2.0)
            .close(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_arrow_spans_both_sides() {
        let path = arrow_path(Heading::North, 100.0, 0.0, 5.0, 10.0);
        assert_eq!(path.x_bounds(), Some((95.0, 105.0)));
    }

    #[test]
    fn test_east_and_west_reach_back_from_tip() {
        assert_eq!(arrow_path(Heading::East, 50.0, 5.0, 5.0, 10.0).x_bounds(), Some((45.0, 50.0)));
        assert_eq!(arrow_path(Heading::West, 50.0, 5.0, 5.0, 10.0).x_bounds(), Some((50.0, 55.0)));
    }
}
