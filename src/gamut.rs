//! This module finds renderable colors. The appearance model's inverse transform is exact algebra
//! and happily asks for a color with negative red or more-than-maximum green when handed an
//! appearance that no sRGB color has; encoding such a color clamps channelwise and silently lands
//! somewhere with the wrong hue *and* the wrong tone. The solver here answers the question
//! honestly: given a hue, a chroma, and a tone, it returns the renderable color with exactly that
//! tone whose hue and chroma come as close as the gamut allows, preferring an exact match.
//!
//! It works in two phases. The first assumes the request is achievable and hunts for the
//! appearance-model lightness that lands the requested chroma and hue on the requested luminance,
//! by a short Newton-style iteration on the inverse transform. When the request is outside the
//! gamut that iteration drives some channel negative or past its maximum, and the second phase
//! takes over: a purely geometric search along the boundary of the RGB cube. The plane of colors
//! with the target luminance cuts the cube in a convex polygon, so the maximum-chroma color at the
//! target hue lies on that polygon's edge. The search brackets the target hue between two polygon
//! vertices and then bisects, stepping only along the finitely many "critical planes" where an
//! encoded channel value actually changes, so the answer it converges to is a real 8-bit color and
//! not a point strictly between two of them.

use std::f64::consts::PI;

use angles::{sanitize_degrees, sanitize_radians};
use color::{y_from_lstar, RGBColor};
use coord::Coord;
use viewing::ViewingConditions;

/// Projects linear RGB intensities (0-100 scale) directly to the chromatically adapted cone
/// responses of the standard viewing conditions, folding the sRGB-to-XYZ matrix, the cone response
/// matrix, and the adaptation factors into one step.
const SCALED_DISCOUNT_FROM_LINRGB: [[f64; 3]; 3] = [
    [0.001200833568784504, 0.002389694492170889, 0.0002795742885861124],
    [0.0005891086651375999, 0.0029785502573438758, 0.0003270666104008398],
    [0.00010146692491640572, 0.0005364214359186694, 0.0032979401770712076],
];

/// The inverse of `SCALED_DISCOUNT_FROM_LINRGB`, precomputed.
const LINRGB_FROM_SCALED_DISCOUNT: [[f64; 3]; 3] = [
    [1373.2198709594231, -1100.4251190754821, -7.278681089101213],
    [-271.815969077903, 559.6580465940733, -32.46047482791194],
    [1.9622899599665666, -57.173814538844006, 308.7233197812385],
];

/// The luminance weights of the linear sRGB primaries.
const Y_FROM_LINRGB: [f64; 3] = [0.2126, 0.7152, 0.0722];

lazy_static! {
    // The linear intensities at which the sRGB transfer function crosses each half-step between
    // adjacent 8-bit encoded values: the only 255 places where a channel's encoded value can
    // change. Derived here with the same piecewise arithmetic that decodes a channel, so the
    // values agree bit for bit with tables of the same constants elsewhere.
    static ref CRITICAL_PLANES: [f64; 255] = {
        let mut planes = [0.0; 255];
        for (i, plane) in planes.iter_mut().enumerate() {
            let encoded = (i as f64 + 0.5) / 255.0;
            *plane = if encoded <= 0.040449936 {
                encoded / 12.92 * 100.0
            } else {
                ((encoded + 0.055) / 1.055).powf(2.4) * 100.0
            };
        }
        planes
    };
}

/// Finds an sRGB color with the given hue, chroma, and tone, reducing chroma to the gamut's
/// ceiling at that hue and tone when the request is not achievable. The result always has the
/// requested tone (within rounding to 8 bits) and is always fully opaque. Hue is taken modulo 360;
/// a chroma too small to matter, or a tone at either end of the scale, short-circuits to the
/// achromatic gray at that tone.
pub fn solve(hue: f64, chroma: f64, tone: f64) -> RGBColor {
    if chroma < 1e-4 || tone < 1e-4 || tone > 99.9999 {
        return RGBColor::from_lstar(tone);
    }

    let hue = sanitize_degrees(hue);
    let hue_radians = hue / 180.0 * PI;
    let y = y_from_lstar(tone);
    match find_result_by_j(hue_radians, chroma, y) {
        Some(exact) => exact,
        None => RGBColor::from_linear(bisect_to_limit(y, hue_radians)),
    }
}

/// Phase one: assume the requested chroma is achievable and iterate on the appearance-model
/// lightness until the inverse transform's luminance hits the target. Returns `None` as soon as
/// the iteration leaves the RGB cube, which is the signal that the request is out of gamut and the
/// boundary search must run instead. The failure is an ordinary value here precisely so that it
/// can never be confused with a color.
fn find_result_by_j(hue_radians: f64, chroma: f64, y: f64) -> Option<RGBColor> {
    // initial estimate of the lightness correlate; close enough that five rounds converge for
    // everything actually in gamut
    let mut j = y.sqrt() * 11.0;
    let conditions = ViewingConditions::standard();
    let t_inner_coeff = 1.0 / (1.64 - 0.29f64.powf(conditions.n)).powf(0.73);
    let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
    let p1 = e_hue * (50000.0 / 13.0) * conditions.nc * conditions.ncb;
    let h_sin = hue_radians.sin();
    let h_cos = hue_radians.cos();

    for iteration_round in 0..5 {
        // the inverse transform of (j, chroma, hue) down to linear RGB, specialized to the
        // standard conditions
        let j_normalized = j / 100.0;
        let alpha = if chroma == 0.0 || j == 0.0 {
            0.0
        } else {
            chroma / j_normalized.sqrt()
        };
        let t = (alpha * t_inner_coeff).powf(1.0 / 0.9);
        let ac = conditions.aw * j_normalized.powf(1.0 / conditions.c / conditions.z);
        let p2 = ac / conditions.nbb;
        let gamma =
            23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;
        let linrgb = matrix_multiply(
            Coord {
                x: inverse_chromatic_adaptation(r_a),
                y: inverse_chromatic_adaptation(g_a),
                z: inverse_chromatic_adaptation(b_a),
            },
            &LINRGB_FROM_SCALED_DISCOUNT,
        );

        if linrgb.x < 0.0 || linrgb.y < 0.0 || linrgb.z < 0.0 {
            return None;
        }
        let fnj =
            Y_FROM_LINRGB[0] * linrgb.x + Y_FROM_LINRGB[1] * linrgb.y + Y_FROM_LINRGB[2] * linrgb.z;
        if fnj <= 0.0 {
            return None;
        }

        if iteration_round == 4 || (fnj - y).abs() < 0.002 {
            // a hair of slack above the cube edge, for rounding error at the white corner
            if linrgb.x > 100.01 || linrgb.y > 100.01 || linrgb.z > 100.01 {
                return None;
            }
            return Some(RGBColor::from_linear(linrgb));
        }

        // Newton step, using luminance's approximately quadratic dependence on j
        j -= (fnj - y) * j / (2.0 * fnj);
    }

    None
}

/// Phase two, outer step: walk the candidate vertices of the polygon where the constant-luminance
/// plane meets the RGB cube, keeping the pair of vertices whose hues bracket the target hue in
/// cyclic order. The polygon is convex, so the bracket narrows to a single edge of it.
fn bisect_to_segment(y: f64, target_hue: f64) -> (Coord, Coord) {
    let mut left = Coord {
        x: -1.0,
        y: -1.0,
        z: -1.0,
    };
    let mut right = left;
    let mut left_hue = 0.0;
    let mut right_hue = 0.0;
    let mut initialized = false;
    let mut uncut = true;

    for n in 0..12 {
        let mid = match nth_vertex(y, n) {
            Some(vertex) => vertex,
            None => continue,
        };
        let mid_hue = hue_of(mid);
        if !initialized {
            left = mid;
            right = mid;
            left_hue = mid_hue;
            right_hue = mid_hue;
            initialized = true;
            continue;
        }
        if uncut || are_in_cyclic_order(left_hue, mid_hue, right_hue) {
            uncut = false;
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                right_hue = mid_hue;
            } else {
                left = mid;
                left_hue = mid_hue;
            }
        }
    }
    (left, right)
}

/// Phase two, inner step: bisect along the bracketing edge toward the exact target hue, one axis
/// at a time, moving only between critical planes so every probed point corresponds to a real
/// 8-bit boundary color. Eight rounds of bisection over at most 255 planes always reaches
/// adjacency.
fn bisect_to_limit(y: f64, target_hue: f64) -> Coord {
    let (mut left, mut right) = bisect_to_segment(y, target_hue);
    let mut left_hue = hue_of(left);

    for axis in 0..3 {
        if axis_value(&left, axis) != axis_value(&right, axis) {
            let (mut l_plane, mut r_plane) =
                if axis_value(&left, axis) < axis_value(&right, axis) {
                    (
                        critical_plane_below(true_delinearized(axis_value(&left, axis))),
                        critical_plane_above(true_delinearized(axis_value(&right, axis))),
                    )
                } else {
                    (
                        critical_plane_above(true_delinearized(axis_value(&left, axis))),
                        critical_plane_below(true_delinearized(axis_value(&right, axis))),
                    )
                };
            for _ in 0..8 {
                if (r_plane - l_plane).abs() <= 1 {
                    break;
                }
                let m_plane = (f64::from(l_plane + r_plane) / 2.0).floor() as i32;
                let mid_plane_coordinate = CRITICAL_PLANES[m_plane as usize];
                let mid = set_coordinate(left, mid_plane_coordinate, right, axis);
                let mid_hue = hue_of(mid);
                if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                    right = mid;
                    r_plane = m_plane;
                } else {
                    left = mid;
                    left_hue = mid_hue;
                    l_plane = m_plane;
                }
            }
        }
    }
    left.midpoint(&right)
}

/// Solves the luminance equation for the nth candidate vertex of the polygon where the plane of
/// constant luminance `y` intersects the RGB cube. Two of the three axes sit at a cube extreme (0
/// or 100) and the luminance equation determines the third; when that solved value falls outside
/// the cube the candidate is not a real vertex and the result is `None`.
fn nth_vertex(y: f64, n: usize) -> Option<Coord> {
    let k_r = Y_FROM_LINRGB[0];
    let k_g = Y_FROM_LINRGB[1];
    let k_b = Y_FROM_LINRGB[2];
    let coord_a = if n % 4 <= 1 { 0.0 } else { 100.0 };
    let coord_b = if n % 2 == 0 { 0.0 } else { 100.0 };

    if n < 4 {
        let g = coord_a;
        let b = coord_b;
        let r = (y - g * k_g - b * k_b) / k_r;
        if is_bounded(r) {
            Some(Coord { x: r, y: g, z: b })
        } else {
            None
        }
    } else if n < 8 {
        let b = coord_a;
        let r = coord_b;
        let g = (y - r * k_r - b * k_b) / k_g;
        if is_bounded(g) {
            Some(Coord { x: r, y: g, z: b })
        } else {
            None
        }
    } else {
        let r = coord_a;
        let g = coord_b;
        let b = (y - r * k_r - g * k_g) / k_b;
        if is_bounded(b) {
            Some(Coord { x: r, y: g, z: b })
        } else {
            None
        }
    }
}

/// The hue, in radians, of a point of linear RGB intensities, computed through the same opponent
/// axes as the full forward transform but starting from the folded cube-basis matrix. Only the
/// angle is needed, so none of the model's magnitude machinery runs.
fn hue_of(linrgb: Coord) -> f64 {
    let scaled_discount = matrix_multiply(linrgb, &SCALED_DISCOUNT_FROM_LINRGB);
    let r_a = chromatic_adaptation(scaled_discount.x);
    let g_a = chromatic_adaptation(scaled_discount.y);
    let b_a = chromatic_adaptation(scaled_discount.z);
    // redness-greenness
    let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
    // yellowness-blueness
    let b = (r_a + g_a - 2.0 * b_a) / 9.0;
    b.atan2(a)
}

/// Whether `b` lies within the arc swept from `a` counterclockwise around to `c`. This is the
/// cyclic replacement for `a <= b <= c`: plain comparisons mean nothing on a circle.
fn are_in_cyclic_order(a: f64, b: f64, c: f64) -> bool {
    let delta_ab = sanitize_radians(b - a);
    let delta_ac = sanitize_radians(c - a);
    delta_ab < delta_ac
}

fn chromatic_adaptation(component: f64) -> f64 {
    let af = component.abs().powf(0.42);
    component.signum() * 400.0 * af / (af + 27.13)
}

fn inverse_chromatic_adaptation(adapted: f64) -> f64 {
    let adapted_abs = adapted.abs();
    let base = (27.13 * adapted_abs / (400.0 - adapted_abs)).max(0.0);
    adapted.signum() * base.powf(1.0 / 0.42)
}

// axes by index, the same way the cube search thinks of them
fn axis_value(point: &Coord, axis: usize) -> f64 {
    [point.x, point.y, point.z][axis]
}

/// Intersects the segment from `source` to `target` with the plane where the given axis has the
/// given coordinate, returning the full 3-component point there.
fn set_coordinate(source: Coord, coordinate: f64, target: Coord, axis: usize) -> Coord {
    let t = (coordinate - axis_value(&source, axis))
        / (axis_value(&target, axis) - axis_value(&source, axis));
    source.lerp(&target, t)
}

/// Like the encoding half of the sRGB transfer function, but without rounding or clamping: the
/// bisection needs the exact fractional encoded position of an intensity, not the nearest
/// displayable channel value.
fn true_delinearized(intensity: f64) -> f64 {
    let normalized = intensity / 100.0;
    let encoded = if normalized <= 0.0031308 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    encoded * 255.0
}

fn critical_plane_below(x: f64) -> i32 {
    (x - 0.5).floor() as i32
}

fn critical_plane_above(x: f64) -> i32 {
    (x - 0.5).ceil() as i32
}

fn is_bounded(value: f64) -> bool {
    value >= 0.0 && value <= 100.0
}

fn matrix_multiply(row: Coord, matrix: &[[f64; 3]; 3]) -> Coord {
    Coord {
        x: row.x * matrix[0][0] + row.y * matrix[0][1] + row.z * matrix[0][2],
        y: row.x * matrix[1][0] + row.y * matrix[1][1] + row.z * matrix[1][2],
        z: row.x * matrix[2][0] + row.y * matrix[2][1] + row.z * matrix[2][2],
    }
}
