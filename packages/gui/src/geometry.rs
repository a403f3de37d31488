//! Rectangle tests used for hit-testing and culling.

use vek::*;


/// Whether `p` lies inside `rect`, with the right and bottom edges excluded.
pub fn contains_point(rect: Rect<i32, i32>, p: Vec2<i32>) -> bool {
    p.x >= rect.x
        && p.y >= rect.y
        && p.x < rect.x + rect.w
        && p.y < rect.y + rect.h
}

/// Whether two rectangles overlap or touch.
pub fn intersects(a: Rect<i32, i32>, b: Rect<i32, i32>) -> bool {
    a.x <= b.x + b.w
        && a.y <= b.y + b.h
        && a.x + a.w >= b.x
        && a.y + a.h >= b.y
}


#[test]
fn hit_test_is_half_open() {
    let rect = Rect::new(10, 10, 50, 20);
    assert!(contains_point(rect, Vec2::new(10, 10)));
    assert!(contains_point(rect, Vec2::new(59, 29)));
    assert!(!contains_point(rect, Vec2::new(60, 30)));
    assert!(!contains_point(rect, Vec2::new(60, 15)));
    assert!(!contains_point(rect, Vec2::new(30, 30)));
    assert!(!contains_point(rect, Vec2::new(9, 15)));
}

#[test]
fn zero_sized_rect_contains_nothing() {
    let rect = Rect::new(4, 4, 0, 0);
    assert!(!contains_point(rect, Vec2::new(4, 4)));
}

#[test]
fn touching_rects_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(intersects(a, Rect::new(10, 0, 5, 5)));
    assert!(intersects(a, Rect::new(2, 2, 2, 2)));
    assert!(!intersects(a, Rect::new(11, 0, 5, 5)));
    assert!(!intersects(a, Rect::new(0, -6, 5, 5)));
}
