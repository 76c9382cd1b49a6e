//! Completion-code derivation
//!
//! A short opaque code derived from the finished run's parameters, meant for
//! out-of-band verification (paste into an external form). It is a plain
//! string hash with no security property whatsoever - never treat it as a
//! credential.

/// Code reported for any failed run.
pub const FAILED_CODE: &str = "FAILED";

/// Derive the success code from the run summary.
///
/// The hash is the classic JS `(h << 5) - h + byte` rolling hash over
/// `"{L:.2}|{theta0_deg}|{b:.3}|{elapsed:.2}|{oscillations}"` with i32
/// wrapping, rendered as `PM-` plus up to 8 uppercase base-36 digits.
pub fn completion_code(
    length: f64,
    theta0_deg: f64,
    damping: f64,
    elapsed: f64,
    oscillations: u32,
) -> String {
    let summary = format!("{length:.2}|{theta0_deg}|{damping:.3}|{elapsed:.2}|{oscillations}");
    let mut h: i32 = 0;
    for byte in summary.bytes() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(byte));
    }
    let mut digits = to_base36_upper(h.unsigned_abs());
    digits.truncate(8);
    format!("PM-{digits}")
}

fn to_base36_upper(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        // Hash of "1.00|45|0.050|12.34|5" is -2014786788 → |h| in base36.
        assert_eq!(completion_code(1.0, 45.0, 0.05, 12.34, 5), "PM-XBJVFO");
        // Hash of "1.50|30|0.100|7.50|5" is 1653797903.
        assert_eq!(completion_code(1.5, 30.0, 0.1, 7.5, 5), "PM-RCMMMN");
    }

    #[test]
    fn test_deterministic() {
        let a = completion_code(1.2, 60.0, 0.02, 33.1, 8);
        let b = completion_code(1.2, 60.0, 0.02, 33.1, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sensitive_to_every_field() {
        let base = completion_code(1.0, 45.0, 0.05, 12.34, 5);
        assert_ne!(base, completion_code(1.01, 45.0, 0.05, 12.34, 5));
        assert_ne!(base, completion_code(1.0, 46.0, 0.05, 12.34, 5));
        assert_ne!(base, completion_code(1.0, 45.0, 0.051, 12.34, 5));
        assert_ne!(base, completion_code(1.0, 45.0, 0.05, 12.35, 5));
        assert_ne!(base, completion_code(1.0, 45.0, 0.05, 12.34, 6));
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(to_base36_upper(u32::MAX), "1Z141Z3");
    }
}
