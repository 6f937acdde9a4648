//! Alternating dual-column layout for timelines.
//!
//! Event `i` goes to the right column when `i` is even and to the left when
//! odd (zero-indexed, strict alternation). Vertical position grows by one
//! fixed row height per event; each side is a single column, so no
//! horizontal overlap check is needed.

use vizier_core::geometry::{Bounds, Point, Size};

use crate::config::TimelineMetrics;

/// Which column an event card occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Geometry for one event row.
#[derive(Debug, Clone, Copy)]
pub struct EventSlot {
    pub index: usize,
    pub side: Side,
    /// Top of the row.
    pub row_y: f32,
    /// Card box for the event content.
    pub card: Bounds,
    /// Numbered dot on the spine.
    pub dot_center: Point,
    /// Horizontal connector from the card edge toward the spine.
    pub connector: Bounds,
}

/// The computed timeline layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub slots: Vec<EventSlot>,
    /// X position of the central spine.
    pub spine_x: f32,
    /// Vertical extent of the spine.
    pub spine_top: f32,
    pub spine_bottom: f32,
    pub size: Size,
}

/// Computes slots for `event_count` events.
pub fn layout(event_count: usize, metrics: &TimelineMetrics) -> Layout {
    let spine_x = metrics.width / 2.0;
    let card_width = metrics
        .card_max_width
        .min(metrics.width * metrics.column_ratio - metrics.connector_length);

    let mut slots = Vec::with_capacity(event_count);
    for index in 0..event_count {
        let side = if index % 2 == 0 {
            Side::Right
        } else {
            Side::Left
        };
        let row_y = metrics.header_height + index as f32 * metrics.row_height;
        let card_y = row_y + (metrics.row_height - metrics.card_height) / 2.0;

        let card_x = match side {
            Side::Right => spine_x + metrics.connector_length,
            Side::Left => spine_x - metrics.connector_length - card_width,
        };
        let card = Bounds::from_origin_size(
            Point::new(card_x, card_y),
            Size::new(card_width, metrics.card_height),
        );

        let dot_center = Point::new(spine_x, card_y + metrics.card_height / 2.0);

        let connector_x = match side {
            Side::Right => spine_x,
            Side::Left => spine_x - metrics.connector_length,
        };
        let connector = Bounds::from_origin_size(
            Point::new(connector_x, dot_center.y() - 1.0),
            Size::new(metrics.connector_length, 2.0),
        );

        slots.push(EventSlot {
            index,
            side,
            row_y,
            card,
            dot_center,
            connector,
        });
    }

    let content_bottom = metrics.header_height + event_count as f32 * metrics.row_height;
    Layout {
        slots,
        spine_x,
        spine_top: metrics.header_height,
        spine_bottom: content_bottom,
        size: Size::new(metrics.width, content_bottom + metrics.padding),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_strict_alternation() {
        let layout = layout(5, &TimelineMetrics::default());
        let sides: Vec<Side> = layout.slots.iter().map(|slot| slot.side).collect();
        assert_eq!(
            sides,
            vec![Side::Right, Side::Left, Side::Right, Side::Left, Side::Right]
        );
    }

    #[test]
    fn test_vertical_positions_strictly_increase() {
        let layout = layout(6, &TimelineMetrics::default());
        for pair in layout.slots.windows(2) {
            assert!(pair[1].row_y > pair[0].row_y);
            assert!(pair[1].dot_center.y() > pair[0].dot_center.y());
        }
    }

    #[test]
    fn test_cards_sit_on_their_side_of_the_spine() {
        let layout = layout(4, &TimelineMetrics::default());
        for slot in &layout.slots {
            match slot.side {
                Side::Right => assert!(slot.card.min_x() > layout.spine_x),
                Side::Left => assert!(slot.card.max_x() < layout.spine_x),
            }
            // Dots always ride the spine.
            assert_approx_eq!(f32, slot.dot_center.x(), layout.spine_x);
        }
    }

    #[test]
    fn test_empty_timeline_has_no_slots() {
        let layout = layout(0, &TimelineMetrics::default());
        assert!(layout.slots.is_empty());
        assert_approx_eq!(f32, layout.spine_top, layout.spine_bottom);
    }
}
