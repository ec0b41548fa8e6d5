//! SVG snapshot of a tour: locations as filled circles, the tour as a closed
//! polyline. Coordinates are scaled by the largest coordinate value so the
//! drawing fits the viewport.

use std::path::Path;

use crate::distance::Location;
use crate::error::{AcoError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub circle_size: f64,
    pub border: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 800.0,
            height: 600.0,
            circle_size: 16.0,
            border: 15.0,
        }
    }
}

impl Viewport {
    /// Scale factor mapping location coordinates into the drawable area.
    /// The limiting axis is whichever holds the largest coordinate.
    fn scale(&self, locations: &[Location]) -> f64 {
        let margin = 2.0 * (self.circle_size + self.border);
        let max_x = locations.iter().map(|l| l.x).fold(0.0, f64::max);
        let max_y = locations.iter().map(|l| l.y).fold(0.0, f64::max);
        if max_x <= 0.0 && max_y <= 0.0 {
            1.0
        } else if max_x >= max_y {
            (self.width - margin) / max_x
        } else {
            (self.height - margin) / max_y
        }
    }
}

pub fn render_svg(locations: &[Location], tour: &[usize], viewport: &Viewport) -> String {
    let scale = viewport.scale(locations);
    let project = |l: &Location| (l.x * scale + viewport.border, l.y * scale + viewport.border);

    let (w, h) = (viewport.width, viewport.height);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\">\n"
    );
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    for location in locations {
        let (cx, cy) = project(location);
        svg.push_str(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"blue\"/>\n",
            cx,
            cy,
            viewport.circle_size / 2.0
        ));
    }

    if !tour.is_empty() {
        let points: Vec<String> = tour
            .iter()
            .filter_map(|&idx| locations.get(idx))
            .map(|l| {
                let (x, y) = project(l);
                format!("{:.2},{:.2}", x, y)
            })
            .collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"red\" stroke-width=\"2\"/>\n",
            points.join(" ")
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(
    path: impl AsRef<Path>,
    locations: &[Location],
    tour: &[usize],
    viewport: &Viewport,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_svg(locations, tour, viewport)).map_err(|source| AcoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Location> {
        vec![
            Location::new(0.0, 0.0),
            Location::new(10.0, 0.0),
            Location::new(10.0, 10.0),
            Location::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_render_contains_points_and_tour() {
        let svg = render_svg(&square(), &[0, 1, 2, 3], &Viewport::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("<polygon").count(), 1);
    }

    #[test]
    fn test_scale_uses_largest_coordinate() {
        let viewport = Viewport::default();
        // 800 - 2 * (16 + 15) = 738 across a max coordinate of 10.
        assert!((viewport.scale(&square()) - 73.8).abs() < 1e-9);
        let svg = render_svg(&square(), &[0, 1, 2, 3], &viewport);
        assert!(svg.contains(r#"cx="753.00""#));
    }

    #[test]
    fn test_header_and_one_element_per_line() {
        let svg = render_svg(&square(), &[0, 1, 2, 3], &Viewport::default());
        let lines: Vec<&str> = svg.lines().collect();
        assert!(lines[0].starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
        assert!(lines[0].ends_with(r#"width="800" height="600" viewBox="0 0 800 600">"#));
        // header, background, 4 circles, polygon, closing tag
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7], "</svg>");
    }

    #[test]
    fn test_empty_tour_draws_no_polygon() {
        let svg = render_svg(&square(), &[], &Viewport::default());
        assert!(!svg.contains("<polygon"));
    }
}
