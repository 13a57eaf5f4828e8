//! SVG rendering of a hemicycle layout.
//!
//! Seats are split into groups (parties) carrying display attributes, then
//! drawn as one `<g>` per group holding one `<circle>` per seat. The drawing
//! area is a 2:1 rectangle, `canvas_size` high, surrounded by margins.
//!
//! # Example
//!
//! ```
//! use hemicycle::{LayoutConfig, Paint, SeatGroup, SvgOptions};
//! use hemicycle::svg::render_attribution;
//!
//! let groups = [
//!     (SeatGroup::new("Left", Paint::parse("#c00").unwrap()), 12),
//!     (SeatGroup::new("Right", Paint::parse("navy").unwrap()), 9),
//! ];
//! let svg = render_attribution(&groups, &LayoutConfig::default(), &SvgOptions::default()).unwrap();
//!
//! assert!(svg.starts_with("<?xml"));
//! assert_eq!(svg.matches("<circle").count(), 21);
//! assert!(svg.ends_with("</svg>\n"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::Paint;
use crate::layout::{LayoutConfig, LayoutError, Seat};

/// Rendering error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The layout could not be computed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A color string is neither hex nor a plain color name.
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    /// The groups claim more seats than were supplied.
    #[error("groups hold {requested} seats but only {available} were supplied")]
    NotEnoughSeats {
        /// Total seat count of the groups.
        requested: u64,
        /// Number of seats supplied.
        available: usize,
    },
    /// A seat refers to a group index outside the group list.
    #[error("seat assigned to unknown group {index}")]
    UnknownGroup {
        /// The offending group index.
        index: usize,
    },
}

/// Display attributes shared by a group of seats.
#[derive(Clone, Debug, PartialEq)]
pub struct SeatGroup {
    /// Number used in the `<g>` id. Groups without one are numbered in
    /// rendering order.
    pub id: Option<u32>,
    /// Free-text label, rendered as the group's `<title>`.
    pub label: String,
    /// Seat fill color.
    pub fill: Paint,
    /// Border width relative to the seat radius. 0 draws no border.
    pub border_size: f64,
    /// Border color.
    pub border_color: Paint,
}

impl SeatGroup {
    /// A borderless group.
    pub fn new(label: impl Into<String>, fill: Paint) -> Self {
        Self {
            id: None,
            label: label.into(),
            fill,
            border_size: 0.0,
            border_color: Paint::default(),
        }
    }

    /// Set the id used in the `<g>` element's id.
    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Draw a border of `size` (relative to the seat radius) in `color`.
    pub fn border(mut self, size: f64, color: Paint) -> Self {
        self.border_size = size;
        self.border_color = color;
        self
    }

    /// Label with every character outside `[A-Za-z0-9_-]` replaced by `-`.
    pub fn sanitized_label(&self) -> String {
        self.label
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect()
    }
}

/// Space around the drawing area, in SVG user units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    /// Explicit margins, in CSS-like `(left, top, right, bottom)` order.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same margin on all four sides.
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

/// Document-level rendering options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Height, and half the width, of the drawing area.
    pub canvas_size: f64,
    /// Space around the drawing area.
    pub margins: Margins,
    /// Write the total seat count under the hemicycle.
    pub write_number_of_seats: bool,
    /// Seat count font size relative to `canvas_size`.
    pub font_size_factor: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            canvas_size: 175.0,
            margins: Margins::default(),
            write_number_of_seats: true,
            font_size_factor: 36.0 / 175.0,
        }
    }
}

/// Hand out `seats`, in order, to each group in turn.
///
/// Group order and seat order are usually both left to right. Fails with
/// [`RenderError::NotEnoughSeats`] when the groups claim more seats than
/// supplied; surplus seats are dropped with a warning.
pub fn dispatch_seats<'g, S>(
    groups: &'g [(SeatGroup, u32)],
    seats: impl IntoIterator<Item = S>,
) -> Result<Vec<(&'g SeatGroup, Vec<S>)>, RenderError> {
    let requested: u64 = groups.iter().map(|(_, n)| u64::from(*n)).sum();
    let mut seats = seats.into_iter();
    let mut dispatched = Vec::with_capacity(groups.len());
    let mut available = 0;

    for (group, nseats) in groups {
        let taken: Vec<S> = seats.by_ref().take(*nseats as usize).collect();
        available += taken.len();
        if taken.len() < *nseats as usize {
            return Err(RenderError::NotEnoughSeats {
                requested,
                available,
            });
        }
        dispatched.push((group, taken));
    }

    let surplus = seats.count();
    if surplus > 0 {
        tracing::warn!(surplus, requested, "more seats supplied than the groups hold");
    }

    Ok(dispatched)
}

/// Compute the layout for `groups` and render it.
///
/// The seat count is the sum of the group sizes; `config.seat_count` is
/// ignored. Groups receive contiguous runs of seats from left to right.
pub fn render_attribution(
    groups: &[(SeatGroup, u32)],
    config: &LayoutConfig,
    options: &SvgOptions,
) -> Result<String, RenderError> {
    let nseats: u64 = groups.iter().map(|(_, n)| u64::from(*n)).sum();
    let nseats = u32::try_from(nseats).map_err(|_| LayoutError::InvalidParameter {
        name: "seat_count",
        reason: "must fit in 32 bits",
    })?;

    let layout = config.seat_count(nseats).compute()?;
    let seats = layout.seats_left_to_right();
    let grouped = dispatch_seats(groups, seats.iter().map(Seat::center))?;

    Ok(render_grouped_svg(
        &grouped,
        layout.metadata.seat_actual_radius,
        options,
    ))
}

/// Render seats assigned one by one to groups.
///
/// `seats` pairs each seat center with an index into `groups`. Groups are
/// drawn in order of first appearance; groups without seats are skipped.
pub fn render_seat_assignment(
    seats: &[((f64, f64), usize)],
    groups: &[SeatGroup],
    seat_actual_radius: f64,
    options: &SvgOptions,
) -> Result<String, RenderError> {
    let mut order = Vec::new();
    let mut buckets: Vec<Vec<(f64, f64)>> = vec![Vec::new(); groups.len()];
    for &(center, index) in seats {
        let bucket = buckets
            .get_mut(index)
            .ok_or(RenderError::UnknownGroup { index })?;
        if bucket.is_empty() {
            order.push(index);
        }
        bucket.push(center);
    }

    let grouped: Vec<(&SeatGroup, Vec<(f64, f64)>)> = order
        .into_iter()
        .map(|index| (&groups[index], core::mem::take(&mut buckets[index])))
        .collect();
    Ok(render_grouped_svg(&grouped, seat_actual_radius, options))
}

/// Render a complete SVG document from seats already split into groups.
///
/// Seat centers are in layout coordinates (`[0, 2] × [0, 1]`, y up) and
/// `seat_actual_radius` in layout units, as in
/// [`LayoutMetadata`](crate::LayoutMetadata).
pub fn render_grouped_svg(
    groups: &[(&SeatGroup, Vec<(f64, f64)>)],
    seat_actual_radius: f64,
    options: &SvgOptions,
) -> String {
    let canvas = options.canvas_size;
    let Margins {
        left,
        top,
        right,
        bottom,
    } = options.margins;

    let mut svg = String::with_capacity(512 + 64 * groups.iter().map(|(_, s)| s.len()).sum::<usize>());

    // Header
    svg.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
    svg.push('\n');
    svg.push_str(&format!(
        r#"<svg xmlns:svg="http://www.w3.org/2000/svg"
     xmlns="http://www.w3.org/2000/svg" version="1.1"
     width="{}" height="{}">"#,
        left + 2.0 * canvas + right,
        top + canvas + bottom
    ));
    svg.push_str("\n    <!-- Created with hemicycle -->");

    // Seat count, centered under the hemicycle
    if options.write_number_of_seats {
        let nseats: usize = groups.iter().map(|(_, seats)| seats.len()).sum();
        let font_size = (options.font_size_factor * canvas).round();
        svg.push_str(&format!(
            r#"
    <text x="{}" y="{}"
          style="font-size:{}px;font-weight:bold;text-align:center;text-anchor:middle;font-family:sans-serif">{}</text>"#,
            left + canvas,
            top + canvas * 170.0 / 175.0,
            font_size,
            nseats
        ));
    }

    // One <g> per group
    let mut fallback_id = 0;
    for (group, centers) in groups {
        let id = group.id.unwrap_or_else(|| {
            fallback_id += 1;
            fallback_id - 1
        });
        let border_width = group.border_size * seat_actual_radius * canvas;

        svg.push_str(&format!("\n    <g style=\"fill:{}", group.fill));
        if border_width != 0.0 {
            svg.push_str(&format!(
                "; stroke-width:{:.2}; stroke:{}",
                border_width, group.border_color
            ));
        }
        svg.push_str(&format!(
            "\"\n       id=\"{}-{}\">",
            id,
            group.sanitized_label()
        ));
        if !group.label.is_empty() {
            svg.push_str(&format!(
                "\n        <title>{}</title>",
                escape_xml(&group.label)
            ));
        }

        let r = seat_actual_radius * canvas - border_width / 2.0;
        for &(x, y) in centers {
            svg.push_str(&format!(
                r#"
        <circle cx="{:.2}" cy="{:.2}" r="{:.2}"/>"#,
                left + canvas * x,
                top + canvas * (1.0 - y),
                r
            ));
        }
        svg.push_str("\n    </g>");
    }

    svg.push_str("\n</svg>\n");
    svg
}

/// Write a rendered document to `writer`.
pub fn write_svg<W: std::io::Write>(mut writer: W, svg: &str) -> std::io::Result<()> {
    writer.write_all(svg.as_bytes())?;
    writer.flush()
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn red() -> Paint {
        Paint::Rgba(Color::from_rgb(255, 0, 0))
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    #[test]
    fn dispatch_splits_in_order() {
        let groups = [(SeatGroup::new("a", red()), 2), (SeatGroup::new("b", red()), 3)];
        let dispatched = dispatch_seats(&groups, 0..5).unwrap();
        assert_eq!(dispatched.len(), 2);
        assert_eq!(dispatched[0].1, vec![0, 1]);
        assert_eq!(dispatched[1].1, vec![2, 3, 4]);
        assert_eq!(dispatched[1].0.label, "b");
    }

    #[test]
    fn dispatch_too_few_seats_errors() {
        let groups = [(SeatGroup::new("a", red()), 2), (SeatGroup::new("b", red()), 3)];
        assert_eq!(
            dispatch_seats(&groups, 0..4).unwrap_err(),
            RenderError::NotEnoughSeats {
                requested: 5,
                available: 4,
            }
        );
    }

    #[test]
    fn dispatch_drops_surplus_seats() {
        let groups = [(SeatGroup::new("a", red()), 2)];
        let dispatched = dispatch_seats(&groups, 0..10).unwrap();
        assert_eq!(dispatched[0].1, vec![0, 1]);
    }

    // ── Document ────────────────────────────────────────────────────────

    #[test]
    fn document_dimensions_include_margins() {
        let options = SvgOptions {
            margins: Margins::new(1.0, 2.0, 3.0, 4.0),
            canvas_size: 100.0,
            ..SvgOptions::default()
        };
        let svg = render_grouped_svg(&[], 0.1, &options);
        assert!(svg.contains(r#"width="204" height="106""#), "{svg}");
        assert!(svg.contains(">0</text>"));
    }

    #[test]
    fn seat_count_text_is_optional() {
        let options = SvgOptions {
            write_number_of_seats: false,
            ..SvgOptions::default()
        };
        let group = SeatGroup::new("a", red());
        let svg = render_grouped_svg(&[(&group, vec![(1.0, 0.5)])], 0.1, &options);
        assert!(!svg.contains("<text"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn circle_coordinates_flip_y_axis() {
        let options = SvgOptions {
            margins: Margins::uniform(0.0),
            canvas_size: 100.0,
            write_number_of_seats: false,
            ..SvgOptions::default()
        };
        let group = SeatGroup::new("a", red());
        let svg = render_grouped_svg(&[(&group, vec![(1.0, 0.5), (0.25, 0.1)])], 0.1, &options);
        assert!(svg.contains(r#"<circle cx="100.00" cy="50.00" r="10.00"/>"#), "{svg}");
        assert!(svg.contains(r#"<circle cx="25.00" cy="90.00" r="10.00"/>"#), "{svg}");
    }

    #[test]
    fn border_shrinks_circles_and_adds_stroke() {
        let options = SvgOptions {
            canvas_size: 100.0,
            ..SvgOptions::default()
        };
        let group = SeatGroup::new("a", red()).border(0.2, Paint::Named("black".into()));
        let svg = render_grouped_svg(&[(&group, vec![(1.0, 0.5)])], 0.1, &options);
        // border width = 0.2 * 0.1 * 100 = 2, radius = 10 - 1
        assert!(svg.contains("fill:#ff0000ff; stroke-width:2.00; stroke:black\""), "{svg}");
        assert!(svg.contains(r#"r="9.00""#));
    }

    #[test]
    fn group_ids_fall_back_to_counter() {
        let a = SeatGroup::new("Les Verts!", red());
        let b = SeatGroup::new("b", red()).id(42);
        let c = SeatGroup::new("", red());
        let svg = render_grouped_svg(
            &[(&a, vec![]), (&b, vec![]), (&c, vec![])],
            0.1,
            &SvgOptions::default(),
        );
        assert!(svg.contains(r#"id="0-Les-Verts-""#), "{svg}");
        assert!(svg.contains(r#"id="42-b""#));
        assert!(svg.contains(r#"id="1-""#));
        assert_eq!(svg.matches("<title>").count(), 2);
    }

    #[test]
    fn title_is_escaped() {
        let group = SeatGroup::new("A & <B>", red());
        let svg = render_grouped_svg(&[(&group, vec![])], 0.1, &SvgOptions::default());
        assert!(svg.contains("<title>A &amp; &lt;B&gt;</title>"));
    }

    // ── End to end ──────────────────────────────────────────────────────

    #[test]
    fn attribution_places_groups_left_to_right() {
        let groups = [
            (SeatGroup::new("left", red()), 5),
            (SeatGroup::new("right", Paint::Named("blue".into())), 5),
        ];
        let options = SvgOptions::default();
        let svg = render_attribution(&groups, &LayoutConfig::default(), &options).unwrap();
        assert_eq!(svg.matches("<circle").count(), 10);
        assert!(svg.contains(">10</text>"));
        let left = svg.find("id=\"0-left\"").unwrap();
        let right = svg.find("id=\"1-right\"").unwrap();
        assert!(left < right);
    }

    #[test]
    fn attribution_propagates_layout_errors() {
        let groups = [(SeatGroup::new("a", red()), 3)];
        let config = LayoutConfig::default().span_angle(0.0);
        assert!(matches!(
            render_attribution(&groups, &config, &SvgOptions::default()),
            Err(RenderError::Layout(LayoutError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn seat_assignment_groups_by_first_appearance() {
        let groups = [SeatGroup::new("a", red()), SeatGroup::new("b", red())];
        let seats = [((0.5, 0.2), 1), ((1.0, 0.5), 0), ((1.5, 0.2), 1)];
        let svg = render_seat_assignment(&seats, &groups, 0.1, &SvgOptions::default()).unwrap();
        assert!(svg.find("id=\"0-b\"").unwrap() < svg.find("id=\"1-a\"").unwrap());
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn seat_assignment_unknown_group_errors() {
        let groups = [SeatGroup::new("a", red())];
        assert_eq!(
            render_seat_assignment(&[((1.0, 0.5), 3)], &groups, 0.1, &SvgOptions::default()),
            Err(RenderError::UnknownGroup { index: 3 })
        );
    }

    #[test]
    fn write_svg_writes_whole_document() {
        let mut out = Vec::new();
        write_svg(&mut out, "<svg/>\n").unwrap();
        assert_eq!(out, b"<svg/>\n");
    }
}
