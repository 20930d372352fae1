//! A one-level squarified treemap layout.
//!
//! Tiles are placed with the squarify heuristic of Bruls, Huizing and van Wijk: items are taken
//! largest first and added to the current strip for as long as that does not make the worst
//! aspect ratio in the strip any worse.

use crate::model::VizRow;
use serde::Serialize;
use std::cmp::Ordering;

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    fn short_side(&self) -> f64 {
        self.w.min(self.h)
    }
}

/// The placement of one `VizRow`. `index` points into the slice passed to [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub index: usize,
    pub rect: Rect,
}

/// Lays out `rows` inside `bounds`, each tile's area proportional to its amount.
///
/// Rows with a zero amount get no tile. The result is ordered by `index`.
pub fn layout(rows: &[VizRow], bounds: Rect) -> Vec<Tile> {
    let mut items: Vec<(usize, f64)> = rows
        .iter()
        .enumerate()
        .map(|(ix, row)| (ix, row.amount().to_f64()))
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = items.iter().map(|(_, v)| v).sum();
    if items.is_empty() || bounds.area() <= 0.0 {
        return Vec::new();
    }

    let scale = bounds.area() / total;
    for item in items.iter_mut() {
        item.1 *= scale;
    }
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut tiles = Vec::with_capacity(items.len());
    let mut free = bounds;
    let mut strip: Vec<(usize, f64)> = Vec::new();
    for item in items {
        let side = free.short_side();
        if strip.is_empty() || worst_with(&strip, item.1, side) <= worst(&strip, side) {
            strip.push(item);
        } else {
            free = place_strip(&strip, free, &mut tiles);
            strip.clear();
            strip.push(item);
        }
    }
    if !strip.is_empty() {
        place_strip(&strip, free, &mut tiles);
    }

    tiles.sort_by_key(|t| t.index);
    tiles
}

/// The worst aspect ratio of the strip when laid along a side of length `side`.
fn worst(strip: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = strip.iter().map(|(_, v)| v).sum();
    strip
        .iter()
        .map(|(_, v)| ratio(*v, sum, side))
        .fold(0.0, f64::max)
}

fn worst_with(strip: &[(usize, f64)], extra: f64, side: f64) -> f64 {
    let sum: f64 = strip.iter().map(|(_, v)| v).sum::<f64>() + extra;
    strip
        .iter()
        .map(|(_, v)| *v)
        .chain(std::iter::once(extra))
        .map(|v| ratio(v, sum, side))
        .fold(0.0, f64::max)
}

fn ratio(area: f64, sum: f64, side: f64) -> f64 {
    let s2 = sum * sum;
    let w2 = side * side;
    f64::max(w2 * area / s2, s2 / (w2 * area))
}

/// Places the strip along the short side of `free` and returns what is left.
fn place_strip(strip: &[(usize, f64)], free: Rect, tiles: &mut Vec<Tile>) -> Rect {
    let sum: f64 = strip.iter().map(|(_, v)| v).sum();
    if free.w >= free.h {
        // Vertical strip on the left.
        let width = if free.h > 0.0 { sum / free.h } else { 0.0 };
        let mut y = free.y;
        for (index, area) in strip {
            let height = if width > 0.0 { area / width } else { 0.0 };
            tiles.push(Tile {
                index: *index,
                rect: Rect::new(free.x, y, width, height),
            });
            y += height;
        }
        Rect::new(free.x + width, free.y, (free.w - width).max(0.0), free.h)
    } else {
        // Horizontal strip on top.
        let height = if free.w > 0.0 { sum / free.w } else { 0.0 };
        let mut x = free.x;
        for (index, area) in strip {
            let width = if height > 0.0 { area / height } else { 0.0 };
            tiles.push(Tile {
                index: *index,
                rect: Rect::new(x, free.y, width, height),
            });
            x += width;
        }
        Rect::new(free.x, free.y + height, free.w, (free.h - height).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{compose, Amount, Currency, CustomEntry, ReferenceRow, Unit};
    use rust_decimal::Decimal;

    const EPS: f64 = 1e-6;

    fn rows(reference: &[i64], custom: i64) -> Vec<VizRow> {
        let filtered: Vec<ReferenceRow> = reference
            .iter()
            .enumerate()
            .map(|(i, v)| {
                ReferenceRow::new(
                    format!("Row {i}"),
                    format!("R{i}"),
                    Amount::new(Decimal::from(*v * 1_000_000)),
                    "reference",
                )
            })
            .collect();
        let entry = CustomEntry::build(Decimal::from(custom), Unit::Million, Currency::Huf, "Me")
            .unwrap();
        compose(&filtered, &entry)
    }

    fn inside(tile: &Tile, bounds: &Rect) -> bool {
        tile.rect.x >= bounds.x - EPS
            && tile.rect.y >= bounds.y - EPS
            && tile.rect.x + tile.rect.w <= bounds.x + bounds.w + EPS
            && tile.rect.y + tile.rect.h <= bounds.y + bounds.h + EPS
    }

    fn overlap(a: &Rect, b: &Rect) -> bool {
        a.x + EPS < b.x + b.w
            && b.x + EPS < a.x + a.w
            && a.y + EPS < b.y + b.h
            && b.y + EPS < a.y + a.h
    }

    #[test]
    fn test_single_tile_fills_bounds() {
        let bounds = Rect::new(10.0, 20.0, 300.0, 100.0);
        let tiles = layout(&rows(&[], 5), bounds);
        assert_eq!(tiles.len(), 1);
        assert!((tiles[0].rect.area() - bounds.area()).abs() < EPS);
    }

    #[test]
    fn test_areas_are_proportional() {
        let bounds = Rect::new(0.0, 0.0, 1600.0, 700.0);
        let viz = rows(&[6, 6, 4, 3, 2, 2], 1);
        let tiles = layout(&viz, bounds);
        assert_eq!(tiles.len(), viz.len());
        let total: f64 = tiles.iter().map(|t| t.rect.area()).sum();
        assert!((total - bounds.area()).abs() < 1e-3);
        let unit = bounds.area() / 24.0;
        assert!((tiles[0].rect.area() - 6.0 * unit).abs() < 1e-3);
        assert!((tiles[6].rect.area() - unit).abs() < 1e-3);
    }

    #[test]
    fn test_tiles_inside_and_disjoint() {
        let bounds = Rect::new(0.0, 0.0, 600.0, 400.0);
        let tiles = layout(&rows(&[6, 6, 4, 3, 2, 2], 1), bounds);
        for (i, a) in tiles.iter().enumerate() {
            assert!(inside(a, &bounds));
            for b in tiles.iter().skip(i + 1) {
                assert!(!overlap(&a.rect, &b.rect), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_ordered_by_index() {
        let tiles = layout(&rows(&[1, 9, 5], 3), Rect::new(0.0, 0.0, 100.0, 100.0));
        let indexes: Vec<_> = tiles.iter().map(|t| t.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_amount_gets_no_tile() {
        let tiles = layout(&rows(&[5, 5], 0), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.index < 2));
    }

    #[test]
    fn test_nothing_to_lay_out() {
        assert!(layout(&rows(&[], 0), Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        assert!(layout(&rows(&[3], 1), Rect::new(0.0, 0.0, 0.0, 100.0)).is_empty());
    }
}
