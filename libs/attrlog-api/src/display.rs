use std::fmt::{self, Write as _};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Timelike};

/// `Duration` in short unit form: `0s`, `250ns`, `1.5µs`, `3ms`, `3s`, `1h2m3.5s`.
pub(crate) fn fmt_duration(d: Duration, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return f.write_str("0s");
    }
    if nanos < 1_000 {
        return write!(f, "{nanos}ns");
    }
    if nanos < 1_000_000 {
        write_scaled(f, nanos, 1_000, 3)?;
        return f.write_str("µs");
    }
    if nanos < 1_000_000_000 {
        write_scaled(f, nanos, 1_000_000, 6)?;
        return f.write_str("ms");
    }

    let secs = d.as_secs();
    let (hours, minutes) = (secs / 3600, secs / 60 % 60);
    if hours > 0 {
        write!(f, "{hours}h")?;
    }
    if hours > 0 || minutes > 0 {
        write!(f, "{minutes}m")?;
    }
    let rest = u128::from(secs % 60) * 1_000_000_000 + u128::from(d.subsec_nanos());
    write_scaled(f, rest, 1_000_000_000, 9)?;
    f.write_str("s")
}

/// Timestamp as `2000-01-02 03:04:05.5 +0000 UTC`.
///
/// Fractional seconds appear only when non-zero. Offsets other than UTC
/// have no zone name, so the offset is repeated in its place.
pub(crate) fn fmt_time(t: &DateTime<FixedOffset>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S"))?;
    // Leap seconds are encoded as nanosecond >= 1e9.
    let nanos = t.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        f.write_str(".")?;
        write_trimmed(f, u128::from(nanos), 9)?;
    }
    let offset = t.format("%z");
    if t.offset().local_minus_utc() == 0 {
        write!(f, " {offset} UTC")
    } else {
        write!(f, " {offset} {offset}")
    }
}

/// Shortest round-trip form of `v`.
///
/// Plain decimals when the decimal exponent is in `-4..21`, otherwise
/// exponent form with a signed exponent of at least two digits: `1e+21`,
/// `1.5e-05`. Infinities are `+Inf` and `-Inf`.
pub(crate) fn fmt_float(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" });
    }
    let mut sci = StackBuf::default();
    write!(sci, "{v:e}")?;
    let (mantissa, exp) = sci.as_str().split_once('e').ok_or(fmt::Error)?;
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    if (-4..21).contains(&exp) {
        return write!(f, "{v}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// Fixed buffer for formatting without allocating. Holds any `f64` in
/// `{:e}` form.
#[derive(Default)]
struct StackBuf {
    buf: [u8; 32],
    len: usize,
}

impl StackBuf {
    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

impl fmt::Write for StackBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// `value / unit` followed by the remainder as trimmed decimals.
fn write_scaled(f: &mut fmt::Formatter<'_>, value: u128, unit: u128, digits: usize) -> fmt::Result {
    write!(f, "{}", value / unit)?;
    let rem = value % unit;
    if rem == 0 {
        return Ok(());
    }
    f.write_str(".")?;
    write_trimmed(f, rem, digits)
}

/// Writes `frac` zero-padded to `digits`, without trailing zeros.
fn write_trimmed(f: &mut fmt::Formatter<'_>, mut frac: u128, mut digits: usize) -> fmt::Result {
    while frac % 10 == 0 && digits > 1 {
        frac /= 10;
        digits -= 1;
    }
    write!(f, "{frac:0digits$}")
}
