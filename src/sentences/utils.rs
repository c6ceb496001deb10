use arrayvec::ArrayString;

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore;

use crate::field::Field;

/// Parses a `&str` slice into an owned `ArrayString` field with a given
/// `CAP`. A slice longer than `CAP` yields an invalid field; an empty
/// slice is a valid empty string (several sentences carry legitimately
/// blank text fields).
pub(crate) fn str_field<const CAP: usize>(s: &str) -> Field<ArrayString<CAP>> {
    match ArrayString::from(s) {
        Ok(owned) => Field::new(owned, true),
        Err(_) => Field::invalid(),
    }
}

/// Converts a `(d)ddmm.mmmm` degrees-and-minutes coordinate to decimal
/// degrees: `dd + mm.mmmm / 60`.
///
/// The sign travels with the truncated integer degrees so negative inputs
/// convert correctly. Input domain is [-18000.0, 18000.0].
pub fn deg_min_to_dec_deg(coords: f32) -> f32 {
    let deg = (coords / 100.0).trunc();
    let min = coords.abs() - deg.abs() * 100.0;

    let decimal = deg.abs() + min / 60.0;

    if deg < 0.0 { -decimal } else { decimal }
}

/// Strict `hhmmss.ss` check: nine characters, a dot at index six, digits
/// everywhere else, tens-of-minutes and tens-of-seconds no greater
/// than five.
pub(crate) fn check_time_format(time: &str) -> bool {
    let b = time.as_bytes();
    if b.len() != 9 || b[6] != b'.' {
        return false;
    }
    let digits_ok = [0, 1, 3, 5, 7, 8]
        .iter()
        .all(|&i| (b[i] as char).is_ascii_digit());

    digits_ok && (b'0'..=b'5').contains(&b[2]) && (b'0'..=b'5').contains(&b[4])
}
