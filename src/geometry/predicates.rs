//! Geometrische Grundprädikate auf f64 mit Toleranzen.
//!
//! Orientierungen werden normalisiert (Sinus bzw. Abstand relativ zur
//! Segmentlänge), damit Toleranzen skalenfrei bleiben.

use glam::DVec2;

/// Relative Toleranz für Schnitt- und Berührungstests.
pub const EPS_REL: f64 = 1e-9;

/// Orientierung von `c` gegenüber der Geraden `a → b` (2× Dreiecksfläche).
#[inline]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Vorzeichenbehafteter Abstand von `c` zur Geraden `a → b` (links positiv).
#[inline]
pub fn signed_distance(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let len = (b - a).length();
    if len <= f64::MIN_POSITIVE {
        return (c - a).length();
    }
    orient(a, b, c) / len
}

/// Sinus und Kosinus der Drehung `prev → cur → next` (links positiv).
///
/// Degenerierte Segmente liefern `(0, 1)`.
#[inline]
pub fn turn(prev: DVec2, cur: DVec2, next: DVec2) -> (f64, f64) {
    let d1 = cur - prev;
    let d2 = next - cur;
    let norm = d1.length() * d2.length();
    if norm <= f64::MIN_POSITIVE {
        return (0.0, 1.0);
    }
    (d1.perp_dot(d2) / norm, d1.dot(d2) / norm)
}

/// Vorzeichenbehafteter Drehwinkel `prev → cur → next` in (-π, π].
#[inline]
pub fn turn_angle(prev: DVec2, cur: DVec2, next: DVec2) -> f64 {
    let d1 = cur - prev;
    let d2 = next - cur;
    d1.perp_dot(d2).atan2(d1.dot(d2))
}

/// Ist die Drehung konvex (links oder kollinear ohne Umkehr)?
#[inline]
pub fn is_convex_turn(prev: DVec2, cur: DVec2, next: DVec2, eps: f64) -> bool {
    let (sine, cosine) = turn(prev, cur, next);
    sine > eps || (sine >= -eps && cosine > 0.0)
}

/// Innenwinkel am Scheitel `apex` zwischen den Schenkeln zu `p` und `q` in [0, π].
#[inline]
pub fn angle_at(apex: DVec2, p: DVec2, q: DVec2) -> f64 {
    let a = p - apex;
    let b = q - apex;
    a.perp_dot(b).abs().atan2(a.dot(b))
}

/// Alle drei Innenwinkel eines Dreiecks (an `a`, `b`, `c`).
pub fn triangle_angles(a: DVec2, b: DVec2, c: DVec2) -> [f64; 3] {
    [angle_at(a, b, c), angle_at(b, c, a), angle_at(c, a, b)]
}

/// Vorzeichenbehaftete Fläche eines Polygons (gegen den Uhrzeigersinn positiv).
pub fn polygon_signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Kürzester Abstand von `p` zum Segment `a–b`.
pub fn point_segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::MIN_POSITIVE {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Liegt `p` (bis auf `eps`) auf dem Segment `a–b`?
fn on_segment(a: DVec2, b: DVec2, p: DVec2, eps: f64) -> bool {
    point_segment_distance(p, a, b) <= eps
}

/// Schneiden oder berühren sich zwei Segmente ohne gemeinsamen Endpunkt?
///
/// Echte Kreuzungen und Berührungen (Endpunkt auf dem anderen Segment,
/// kollineare Überlappung) zählen beide als Schnitt.
pub fn segments_intersect(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let scale = (b - a).length().max((d - c).length());
    if scale <= f64::MIN_POSITIVE {
        return a.distance(c) <= f64::MIN_POSITIVE;
    }
    let eps = EPS_REL * scale;

    let d1 = signed_distance(a, b, c);
    let d2 = signed_distance(a, b, d);
    let d3 = signed_distance(c, d, a);
    let d4 = signed_distance(c, d, b);

    let straddles = |x: f64, y: f64| (x > eps && y < -eps) || (x < -eps && y > eps);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    on_segment(a, b, c, eps)
        || on_segment(a, b, d, eps)
        || on_segment(c, d, a, eps)
        || on_segment(c, d, b, eps)
}

/// Überlappen zwei Segmente `s–a` und `s–b` mit gemeinsamem Endpunkt `s` über `s` hinaus?
///
/// Das ist nur bei kollinearer, gleichgerichteter Lage der Fall.
pub fn shared_endpoint_overlap(s: DVec2, a: DVec2, b: DVec2) -> bool {
    let da = a - s;
    let db = b - s;
    let norm = da.length() * db.length();
    if norm <= f64::MIN_POSITIVE {
        return true;
    }
    (da.perp_dot(db) / norm).abs() <= EPS_REL && da.dot(db) > 0.0
}

/// Liegt `p` innerhalb oder auf dem Rand des Dreiecks `a, b, c` (gegen den Uhrzeigersinn)?
pub fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let scale = (b - a).length().max((c - b).length()).max((a - c).length());
    let eps = EPS_REL * scale;
    signed_distance(a, b, p) >= -eps
        && signed_distance(b, c, p) >= -eps
        && signed_distance(c, a, p) >= -eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    fn v(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn orientation_sign() {
        assert!(orient(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)) > 0.0);
        assert!(orient(v(0.0, 0.0), v(1.0, 0.0), v(0.0, -1.0)) < 0.0);
        assert_eq!(orient(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)), 0.0);
    }

    #[test]
    fn equilateral_triangle_angles() {
        let h = 3.0_f64.sqrt() / 2.0;
        let angles = triangle_angles(v(0.0, 0.0), v(1.0, 0.0), v(0.5, h));
        for angle in angles {
            assert_relative_eq!(angle, FRAC_PI_3, epsilon = 1e-12);
        }
        assert_relative_eq!(angle_at(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 3.0)), FRAC_PI_2);
    }

    #[test]
    fn convex_turn_accepts_collinear_but_not_reversal() {
        let eps = 1e-9;
        assert!(is_convex_turn(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), eps));
        assert!(is_convex_turn(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), eps));
        assert!(!is_convex_turn(v(0.0, 0.0), v(1.0, 0.0), v(0.5, 0.0), eps));
        assert!(!is_convex_turn(v(0.0, 0.0), v(1.0, 0.0), v(2.0, -0.1), eps));
    }

    #[test]
    fn proper_crossing_and_touching_are_intersections() {
        assert!(segments_intersect(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)));
        // T-Berührung: Endpunkt c liegt auf a–b
        assert!(segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)));
        // Kollineare Überlappung
        assert!(segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)));
    }

    #[test]
    fn intersection_is_scale_free() {
        let s = 1e6;
        assert!(!segments_intersect(
            v(0.0, 0.0),
            v(s, 0.0),
            v(0.0, s * 1e-6),
            v(s, s * 1e-6)
        ));
    }

    #[test]
    fn shared_endpoint_only_overlaps_when_collinear_same_direction() {
        let s = v(0.0, 0.0);
        assert!(shared_endpoint_overlap(s, v(1.0, 0.0), v(2.0, 0.0)));
        assert!(!shared_endpoint_overlap(s, v(1.0, 0.0), v(-2.0, 0.0)));
        assert!(!shared_endpoint_overlap(s, v(1.0, 0.0), v(1.0, 1.0)));
    }

    #[test]
    fn area_and_distance_helpers() {
        let square = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
        assert_relative_eq!(polygon_signed_area(&square), 1.0);
        let reversed: Vec<DVec2> = square.iter().rev().copied().collect();
        assert_relative_eq!(polygon_signed_area(&reversed), -1.0);

        assert_relative_eq!(point_segment_distance(v(0.5, 2.0), v(0.0, 0.0), v(1.0, 0.0)), 2.0);
        assert_relative_eq!(point_segment_distance(v(3.0, 0.0), v(0.0, 0.0), v(1.0, 0.0)), 2.0);
        assert!(point_in_triangle(v(0.2, 0.2), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
        assert!(!point_in_triangle(v(0.8, 0.8), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
    }
}
