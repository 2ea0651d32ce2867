//! Reading-order reconstruction for a page's lines.
//!
//! The service emits lines in detection order, which interleaves columns on
//! multi-column layouts. This module rebuilds left-to-right, top-to-bottom
//! order from bounding boxes alone: lines are clustered greedily into column
//! descriptors, then emitted column by column.
//!
//! Columns are created in discovery order and never merged or reordered, so
//! the final sort key is column creation order rather than horizontal
//! position.

use serde::Serialize;

use crate::model::Line;

/// Two lines starting within this horizontal distance share a column.
const STARTING_POINT_TOLERANCE: f32 = 0.01;

/// A line whose top is within this many line-heights of the column's last
/// top continues the column.
const HEIGHT_TOLERANCE: f32 = 3.0;

/// Tops closer than this count as the same visual row.
const SAME_LINE_TOP_TOLERANCE: f32 = 0.001;

/// A fragment starting within this many starting-point tolerances of the
/// column's right edge is a mid-row continuation split off by the service.
const SAME_LINE_SPACING_TOLERANCE: f32 = 5.0;

/// A geometric cluster of lines sharing a horizontal start.
///
/// `top` and `right` track the most recently added line; `left` is fixed at
/// creation.
#[derive(Debug, Clone, Copy)]
struct Column {
    left: f32,
    right: f32,
    top: f32,
}

/// One line's position in the recovered reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedLine {
    /// Index of the column the line was assigned to, in column creation
    /// order
    pub column: usize,
    /// The line's text
    pub text: String,
}

/// Assign each line to a column and emit the lines sorted by column.
///
/// Within a column the original scan order is preserved (stable sort).
pub fn lines_in_reading_order(lines: &[Line]) -> Vec<OrderedLine> {
    let mut columns: Vec<Column> = Vec::new();
    let mut ordered: Vec<OrderedLine> = Vec::new();

    for line in lines {
        let bbox = line.geometry().bounding_box();
        let left = bbox.left();
        let right = bbox.right();
        let top = bbox.top();
        let height = bbox.height();

        let mut matched = None;
        for (index, column) in columns.iter().enumerate() {
            // A: the line starts where the column starts and is vertically
            // close to the column's last line.
            let same_start = (left - column.left).abs() < STARTING_POINT_TOLERANCE;
            let near_top = (top - column.top).abs() < HEIGHT_TOLERANCE * height;
            // B: the line sits on the same visual row and begins right where
            // the column's last line ended, i.e. a split-line fragment.
            let same_row = (top - column.top).abs() < SAME_LINE_TOP_TOLERANCE;
            let adjoins_right =
                (left - column.right).abs() < SAME_LINE_SPACING_TOLERANCE * STARTING_POINT_TOLERANCE;

            if (same_start && near_top) || (same_row && adjoins_right) {
                matched = Some(index);
                break;
            }
        }

        match matched {
            Some(index) => {
                ordered.push(OrderedLine {
                    column: index,
                    text: line.text().to_string(),
                });
                columns[index].top = top;
                columns[index].right = right;
            }
            None => {
                columns.push(Column { left, right, top });
                ordered.push(OrderedLine {
                    column: columns.len() - 1,
                    text: line.text().to_string(),
                });
            }
        }
    }

    ordered.sort_by_key(|line| line.column);
    ordered
}

/// The reading-order texts concatenated, each followed by a newline.
pub fn text_in_reading_order(lines: &[Line]) -> String {
    let mut text = String::new();
    for line in lines_in_reading_order(lines) {
        text.push_str(&line.text);
        text.push('\n');
    }
    text
}
