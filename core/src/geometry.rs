use crate::error::ChannelError;
use crate::types::Frame;

/// Vektorer kortere enn dette (piksler) gir ingen meningsfull vinkel.
const MIN_VECTOR_PX: f64 = 1e-6;

/// Euklidsk avstand mellom to punkter.
#[inline]
pub fn distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    ((q.0 - p.0).powi(2) + (q.1 - p.1).powi(2)).sqrt()
}

/// Landmark i pikselkoordinater. Manglende punkt eller visibility under
/// `min_visibility` gir `MissingLandmark`. Manglende visibility regnes som synlig.
pub fn pixel_point(frame: &Frame, joint: usize, min_visibility: f64) -> Result<(f64, f64), ChannelError> {
    let lm = frame
        .landmark(joint)
        .ok_or(ChannelError::MissingLandmark(joint))?;
    if let Some(v) = lm.visibility {
        if !(v >= min_visibility) {
            return Err(ChannelError::MissingLandmark(joint));
        }
    }
    if !lm.x.is_finite() || !lm.y.is_finite() {
        return Err(ChannelError::MissingLandmark(joint));
    }
    Ok((lm.x * frame.width, lm.y * frame.height))
}

/// Indre vinkel (grader, 0..=180) i toppunktet `b` mellom b→a og b→c.
pub fn joint_angle(
    frame: &Frame,
    a: usize,
    b: usize,
    c: usize,
    min_visibility: f64,
) -> Result<f64, ChannelError> {
    let pa = pixel_point(frame, a, min_visibility)?;
    let pb = pixel_point(frame, b, min_visibility)?;
    let pc = pixel_point(frame, c, min_visibility)?;
    angle_at(pa, pb, pc).ok_or(ChannelError::DegenerateGeometry(b))
}

/// Vinkelformelen på rene punkter. `None` ved ~0-lengde vektor.
pub fn angle_at(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Option<f64> {
    let v1 = (a.0 - b.0, a.1 - b.1);
    let v2 = (c.0 - b.0, c.1 - b.1);

    let mag1 = distance(b, a);
    let mag2 = distance(b, c);
    if mag1 < MIN_VECTOR_PX || mag2 < MIN_VECTOR_PX {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    // clamp mot flyttallsdrift utenfor acos-domenet
    let cos = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Snitt av flere leddvinkler (f.eks. venstre + høyre albue). Alle må være tilgjengelige.
pub fn mean_joint_angle(
    frame: &Frame,
    triples: &[(usize, usize, usize)],
    min_visibility: f64,
) -> Result<f64, ChannelError> {
    let mut sum = 0.0;
    for &(a, b, c) in triples {
        sum += joint_angle(frame, a, b, c, min_visibility)?;
    }
    Ok(sum / triples.len().max(1) as f64)
}

/// Midtpunkt (piksler) av en gruppe ledd.
pub fn midpoint(frame: &Frame, joints: &[usize], min_visibility: f64) -> Result<(f64, f64), ChannelError> {
    let (mut sx, mut sy) = (0.0, 0.0);
    for &j in joints {
        let (x, y) = pixel_point(frame, j, min_visibility)?;
        sx += x;
        sy += y;
    }
    let n = joints.len().max(1) as f64;
    Ok((sx / n, sy / n))
}

#[inline]
pub fn mean_x(frame: &Frame, joints: &[usize], min_visibility: f64) -> Result<f64, ChannelError> {
    midpoint(frame, joints, min_visibility).map(|p| p.0)
}

#[inline]
pub fn mean_y(frame: &Frame, joints: &[usize], min_visibility: f64) -> Result<f64, ChannelError> {
    midpoint(frame, joints, min_visibility).map(|p| p.1)
}

/// Signert horisontal avstand midtpunkt(a) − midtpunkt(b) i piksler.
pub fn horizontal_offset(
    frame: &Frame,
    a: &[usize],
    b: &[usize],
    min_visibility: f64,
) -> Result<f64, ChannelError> {
    Ok(mean_x(frame, a, min_visibility)? - mean_x(frame, b, min_visibility)?)
}
