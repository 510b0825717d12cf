//! Encoded polyline format.
//!
//! The maps provider returns routes as an "encoded polyline": each point is
//! stored as the signed delta from the previous point, in units of 1e-5
//! degrees, zig-zag encoded and split into 5-bit chunks. Each chunk is
//! offset by 63 to land in printable ASCII, and every chunk except the last
//! of a value has the continuation bit (0x20) set.
//!
//! Decoding must be bit-exact with the provider's encoder, since the
//! renderer draws whatever comes out of [`decode`].

use crate::domain::Coordinate;

/// Fixed-point scale: five decimal places.
const PRECISION: f64 = 1e5;

/// Offset added to every chunk to make it printable.
const ASCII_OFFSET: u8 = 63;

/// Set on every chunk that is followed by another chunk of the same value.
const CONTINUATION_BIT: i64 = 0x20;

const CHUNK_MASK: i64 = 0x1f;

/// A 32-bit value needs at most seven 5-bit chunks.
const MAX_SHIFT: u32 = 30;

/// Errors from decoding a malformed polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// Input ended in the middle of a value, or after a latitude with no
    /// matching longitude.
    #[error("polyline truncated at byte {position}")]
    Truncated { position: usize },

    /// A byte outside the encoded alphabet (`?` through `~`).
    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { position: usize, character: char },

    /// A value with more chunks than any 32-bit delta needs.
    #[error("polyline value starting before byte {position} is too long")]
    Overflow { position: usize },

    /// Decoded point is not a valid coordinate.
    #[error("polyline point {index} is out of range")]
    OutOfRange { index: usize },
}

/// Decode an encoded polyline into its points.
///
/// An empty string decodes to an empty path.
///
/// # Examples
///
/// ```
/// use trip_server::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].latitude() - 38.5).abs() < 1e-9);
/// assert!((points[2].longitude() - -126.453).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while position < bytes.len() {
        lat += next_value(bytes, &mut position)?;
        lng += next_value(bytes, &mut position)?;

        let point = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION).map_err(
            |_| PolylineError::OutOfRange {
                index: points.len(),
            },
        )?;
        points.push(point);
    }

    Ok(points)
}

/// Encode points as a polyline.
///
/// Coordinates are rounded to five decimal places, so
/// `decode(&encode(points))` reproduces `points` to within 1e-5 degrees.
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = to_fixed(point.latitude());
        let lng = to_fixed(point.longitude());
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn to_fixed(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

/// Read one zig-zag encoded value starting at `position`, advancing past it.
fn next_value(bytes: &[u8], position: &mut usize) -> Result<i64, PolylineError> {
    let start = *position;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(PolylineError::Truncated {
                position: *position,
            });
        };
        if !(ASCII_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *position,
                character: char::from(byte),
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }
        *position += 1;

        let chunk = i64::from(byte - ASCII_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };

    while v >= CONTINUATION_BIT {
        push_chunk((CONTINUATION_BIT | (v & CHUNK_MASK)) as u8, out);
        v >>= 5;
    }
    push_chunk(v as u8, out);
}

fn push_chunk(chunk: u8, out: &mut String) {
    out.push(char::from(chunk + ASCII_OFFSET));
}
