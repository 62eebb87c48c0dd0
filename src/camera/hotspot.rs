// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hot-spot search and pixel-to-encoder conversion.
//!
//! The target is the centre of the hottest `BLOCK_SIZE x BLOCK_SIZE` window in the frame. The
//! window slides over every offset where it fits entirely inside the frame; the first maximum in
//! row-major order wins ties.

use crate::camera::Frame;
use crate::config::{AcquisitionConfig, BLOCK_SIZE};

/// Top-left offset and sample sum of a search window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub row: usize,
    pub col: usize,
    pub sum: u32,
}

impl Window {
    /// Centre pixel of the window.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (self.row + BLOCK_SIZE / 2, self.col + BLOCK_SIZE / 2)
    }
}

/// Encoder displacement that points the turret at a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AimPoint {
    /// Horizontal (yaw) displacement, ticks.
    pub x_ticks: f32,
    /// Vertical (pitch) displacement, ticks.
    pub y_ticks: f32,
}

fn window_sum<const ROWS: usize, const COLS: usize>(
    frame: &Frame<ROWS, COLS>,
    row: usize,
    col: usize,
) -> u32 {
    let mut sum = 0u32;
    for r in row..row + BLOCK_SIZE {
        for &s in &frame.row(r)[col..col + BLOCK_SIZE] {
            sum += s as u32;
        }
    }
    sum
}

/// Find the hottest window. `None` if the frame is smaller than one window.
pub fn find_hotspot<const ROWS: usize, const COLS: usize>(
    frame: &Frame<ROWS, COLS>,
) -> Option<Window> {
    if ROWS < BLOCK_SIZE || COLS < BLOCK_SIZE {
        return None;
    }

    let mut best: Option<Window> = None;
    for row in 0..=ROWS - BLOCK_SIZE {
        for col in 0..=COLS - BLOCK_SIZE {
            let sum = window_sum(frame, row, col);
            // Strictly greater keeps the earliest maximum.
            if best.map_or(true, |b| sum > b.sum) {
                best = Some(Window { row, col, sum });
            }
        }
    }
    best
}

/// Angle, in degrees, of `coord` from the centre of an axis `dim` pixels wide.
pub fn pixel_to_degrees(coord: f32, dim: usize, fov_deg: f32) -> f32 {
    let half = dim as f32 / 2.0;
    (fov_deg / 2.0) * ((coord - half) / half)
}

/// Encoder ticks for an angle in degrees.
pub fn degrees_to_ticks(angle_deg: f32, ticks_per_rev: f32) -> f32 {
    angle_deg * (ticks_per_rev / 360.0)
}

/// Convert a window centre into per-axis encoder displacements.
pub fn aim_at<const ROWS: usize, const COLS: usize>(
    window: &Window,
    config: &AcquisitionConfig,
) -> AimPoint {
    let (mid_row, mid_col) = window.center();

    let vertical = pixel_to_degrees(mid_row as f32, ROWS, config.fov_vertical_deg);
    let horizontal = pixel_to_degrees(mid_col as f32, COLS, config.fov_horizontal_deg);

    AimPoint {
        x_ticks: degrees_to_ticks(horizontal, config.ticks_per_rev),
        y_ticks: degrees_to_ticks(vertical, config.ticks_per_rev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn single_hot_block_is_found_exactly() {
        for (row, col) in [(0, 0), (5, 5), (2, 3), (0, 5), (4, 1)] {
            let mut frame = Frame::<10, 10>::new();
            frame.fill_block(row, col, 5, 5, 90);

            let w = find_hotspot(&frame).unwrap();
            assert_eq!((w.row, w.col), (row, col));
            assert_eq!(w.sum, 25 * 90);
        }
    }

    #[test]
    fn ties_go_to_first_in_row_major_order() {
        let mut frame = Frame::<10, 10>::new();
        frame.fill_block(5, 0, 5, 5, 50);
        frame.fill_block(0, 5, 5, 5, 50);

        let w = find_hotspot(&frame).unwrap();
        assert_eq!((w.row, w.col), (0, 5));
    }

    #[test]
    fn uniform_frame_picks_origin() {
        let frame = Frame::<8, 12>::new();
        let w = find_hotspot(&frame).unwrap();
        assert_eq!((w.row, w.col, w.sum), (0, 0, 0));
    }

    #[test]
    fn window_covers_last_row_and_column() {
        let mut frame = Frame::<7, 9>::new();
        frame.set(6, 8, 1000);

        let w = find_hotspot(&frame).unwrap();
        assert_eq!((w.row, w.col), (2, 4));
    }

    #[test]
    fn frame_smaller_than_window_has_no_hotspot() {
        let frame = Frame::<4, 10>::new();
        assert_eq!(find_hotspot(&frame), None);
    }

    #[test]
    fn pixel_angles_are_linear_about_the_centre() {
        assert!(close(pixel_to_degrees(12.0, 24, 55.0), 0.0));
        assert!(close(pixel_to_degrees(24.0, 24, 55.0), 27.5));
        assert!(close(pixel_to_degrees(0.0, 32, 35.0), -17.5));
        assert!(close(degrees_to_ticks(360.0, 16384.0), 16384.0));
        assert!(close(degrees_to_ticks(-90.0, 16384.0), -4096.0));
    }

    #[test]
    fn aim_point_uses_row_for_pitch_and_column_for_yaw() {
        let config = AcquisitionConfig::default();
        let w = Window { row: 14, col: 20, sum: 0 };

        let aim = aim_at::<24, 32>(&w, &config);

        // Row 16 of 24 over 55 deg, column 22 of 32 over 35 deg.
        let pitch = 27.5 * (4.0 / 12.0) * (16384.0 / 360.0);
        let yaw = 17.5 * (6.0 / 16.0) * (16384.0 / 360.0);
        assert!(close(aim.y_ticks, pitch));
        assert!(close(aim.x_ticks, yaw));
    }
}
