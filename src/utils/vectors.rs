use glam::DVec2;

use crate::utils::math::angle_offset;

/// Unit vector for a bearing measured clockwise from north (x east, y north)
#[inline]
pub fn vectorize_2d(bearing: f64) -> DVec2 {
    DVec2::new(bearing.sin(), bearing.cos())
}

/// Bearing of a vector, measured clockwise from north
#[inline]
pub fn vradial(v: DVec2) -> f64 {
    v.x.atan2(v.y)
}

/// Bearing from one relative position to another
#[inline]
pub fn bearing_to(from: DVec2, to: DVec2) -> f64 {
    vradial(to - from)
}

/// Decomposition of the vector to a target against a course line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseOffset {
    /// Signed abeam distance from the course line, km (positive right of course)
    pub lateral: f64,
    /// Along-course distance to the target, km (positive when the target is ahead)
    pub along: f64,
    /// Straight-line distance to the target, km
    pub distance: f64,
}

/// Offsets of `target` from `position`, relative to a course line through the
/// target with the given bearing
pub fn course_offset(position: DVec2, target: DVec2, course: f64) -> CourseOffset {
    let to_target = target - position;
    let distance = to_target.length();
    let angle_off_course = angle_offset(vradial(to_target), course);

    CourseOffset {
        lateral: distance * angle_off_course.sin(),
        along: distance * angle_off_course.cos(),
        distance,
    }
}

/// Check if a point is inside a polygon
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let n = polygon.len();

    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        if (polygon[i].y < point.y && polygon[j].y >= point.y)
            || (polygon[j].y < point.y && polygon[i].y >= point.y)
        {
            let x_crossing = polygon[i].x
                + (point.y - polygon[i].y) / (polygon[j].y - polygon[i].y)
                    * (polygon[j].x - polygon[i].x);

            if x_crossing < point.x {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}

/// Shortest distance from a point to a polygon's boundary, km
pub fn distance_to_polygon(point: DVec2, polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    let mut shortest = f64::INFINITY;
    let mut j = match n {
        0 => return shortest,
        _ => n - 1,
    };

    for i in 0..n {
        shortest = shortest.min(distance_to_segment(point, polygon[j], polygon[i]));
        j = i;
    }

    shortest
}

/// Result of probing a multi-ring polygon: the first ring is the outer
/// boundary, subsequent rings are holes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonProbe {
    pub inside: bool,
    /// Distance to the nearest ring boundary, km
    pub distance: f64,
}

/// Test a point against a polygon with optional holes
pub fn point_to_multipolygon(point: DVec2, rings: &[Vec<DVec2>]) -> PolygonProbe {
    let Some(outer) = rings.first() else {
        return PolygonProbe {
            inside: false,
            distance: f64::INFINITY,
        };
    };

    let mut inside = point_in_polygon(point, outer);

    if inside {
        for hole in &rings[1..] {
            if point_in_polygon(point, hole) {
                inside = false;
                break;
            }
        }
    }

    let distance = rings
        .iter()
        .map(|ring| distance_to_polygon(point, ring))
        .fold(f64::INFINITY, f64::min);

    PolygonProbe { inside, distance }
}

fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let length_squared = ab.length_squared();

    if length_squared == 0.0 {
        return (point - a).length();
    }

    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);

    (point - (a + ab * t)).length()
}
