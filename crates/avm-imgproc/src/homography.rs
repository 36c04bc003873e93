use faer::prelude::SpSolver;

/// Determinant magnitude under which a homography is considered degenerate.
pub const DEGENERATE_DETERMINANT_EPS: f32 = 1e-8;

/// Compute the perspective transform that maps four source points onto four destination points.
///
/// The 8 unknowns of the homography (with `h33 = 1`) are found by solving the linear
/// system built from the correspondences with a partial-pivot LU decomposition.
///
/// Collinear correspondences make the system singular. The solve still returns a matrix,
/// possibly with non-finite entries; use [`is_degenerate`] to detect it.
///
/// # Arguments
///
/// * `src` - The source points `[x, y]`.
/// * `dst` - The destination points `[x, y]`.
///
/// # Returns
///
/// The row-major 3x3 homography mapping `src` to `dst`.
///
/// # Example
///
/// ```
/// use avm_imgproc::homography::{get_perspective_transform, transform_point};
///
/// let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
/// let dst = [[2.0, 3.0], [3.0, 3.0], [2.0, 4.0], [3.0, 4.0]];
///
/// let m = get_perspective_transform(&src, &dst);
/// let (x, y) = transform_point(1.0, 1.0, &m);
///
/// assert!((x - 3.0).abs() < 1e-4);
/// assert!((y - 4.0).abs() < 1e-4);
/// ```
pub fn get_perspective_transform(src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> [f32; 9] {
    // construct the system A h = b
    let mut a = [[0.0f64; 8]; 8];
    let mut b = [0.0f64; 8];
    for i in 0..4 {
        let (x, y) = (src[i][0] as f64, src[i][1] as f64);
        let (u, v) = (dst[i][0] as f64, dst[i][1] as f64);

        a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y];
        b[2 * i] = u;

        a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y];
        b[2 * i + 1] = v;
    }

    let mat_a = faer::Mat::<f64>::from_fn(8, 8, |i, j| a[i][j]);
    let mat_b = faer::Mat::<f64>::from_fn(8, 1, |i, _| b[i]);

    // solve -> h_mat: 8x1
    let h_mat = mat_a.partial_piv_lu().solve(mat_b);
    let h = h_mat.col(0);

    [
        h[0] as f32,
        h[1] as f32,
        h[2] as f32,
        h[3] as f32,
        h[4] as f32,
        h[5] as f32,
        h[6] as f32,
        h[7] as f32,
        1.0,
    ]
}

/// Check whether a homography is singular, near-singular or contains non-finite entries.
pub fn is_degenerate(m: &[f32; 9]) -> bool {
    let det = determinant3x3(m);
    !det.is_finite() || det.abs() < DEGENERATE_DETERMINANT_EPS
}

/// Check whether any three of the four points are collinear.
///
/// Such a quad cannot define a unique homography.
pub fn is_degenerate_quad(points: &[[f32; 2]; 4]) -> bool {
    const TRIPLETS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLETS.iter().any(|&[i, j, k]| {
        let (a, b, c) = (points[i], points[j], points[k]);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        cross.abs() < 1e-3
    })
}

#[rustfmt::skip]
pub(crate) fn determinant3x3(m: &[f32; 9]) -> f32 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f32; 9]) -> [f32; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

/// Invert a 3x3 perspective matrix.
///
/// A singular matrix yields non-finite entries instead of an error; points mapped through
/// it fall outside every image and resample to the border value.
pub fn inverse_perspective_matrix(m: &[f32; 9]) -> [f32; 9] {
    let inv_det = 1.0 / determinant3x3(m);
    adjugate3x3(m).map(|v| v * inv_det)
}

/// Apply a perspective matrix to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 9]) -> (f32, f32) {
    let w = m[6] * x + m[7] * y + m[8];
    let xt = (m[0] * x + m[1] * y + m[2]) / w;
    let yt = (m[3] * x + m[4] * y + m[5]) / w;
    (xt, yt)
}
