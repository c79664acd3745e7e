//! The per-event container handed from a logger to its handler.
//!
//! A [`Record`] stores its first [`NATTRS_INLINE`] attributes inline and
//! the rest in a shared overflow buffer. [`Record::share`] copies a record
//! the cheap way and keeps that buffer shared, spare capacity included;
//! [`Clone`] clips the copy's capacity so neither side can ever write into
//! the other's storage. Appending to both a record and its share is a
//! programming error and panics.

use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};

use crate::args::{Arg, count_attrs, take_args};
use crate::attr::Attr;
use crate::level::Level;
use crate::text::SharedStr;

/// Attributes stored inline before spilling to the overflow buffer.
pub const NATTRS_INLINE: usize = 5;

/// Smallest overflow buffer allocated on first spill.
const MIN_OVERFLOW: usize = 4;

/// Request-scoped data carried alongside a record. Never inspected here.
pub type Context = Arc<dyn Any + Send + Sync>;

/// Call site of a logging statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine {
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

pub struct Record {
    pub time: DateTime<Utc>,
    pub message: SharedStr,
    pub level: Level,
    pub context: Option<Context>,
    source: Option<&'static Location<'static>>,
    front: [Attr; NATTRS_INLINE],
    n_front: usize,
    back: Overflow,
}

impl Record {
    pub fn new(
        time: DateTime<Utc>,
        level: Level,
        message: impl Into<SharedStr>,
        context: Option<Context>,
        source: Option<&'static Location<'static>>,
    ) -> Self {
        Self {
            time,
            message: message.into(),
            level,
            context,
            source,
            front: std::array::from_fn(|_| Attr::default()),
            n_front: 0,
            back: Overflow::default(),
        }
    }

    /// File and line of the call site, when the record was built with one.
    pub fn source(&self) -> Option<SourceLine> {
        self.source.map(|loc| SourceLine {
            file: loc.file(),
            line: loc.line(),
        })
    }

    pub fn num_attrs(&self) -> usize {
        self.n_front + self.back.len
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = &Attr> + '_ {
        self.front[..self.n_front].iter().chain(self.back.iter())
    }

    /// Calls `visit` on each attribute in order, stopping when it returns false.
    pub fn for_each_attr(&self, mut visit: impl FnMut(&Attr) -> bool) {
        for attr in self.attrs() {
            if !visit(attr) {
                return;
            }
        }
    }

    /// Appends `attrs`, filling inline storage first.
    ///
    /// # Panics
    ///
    /// If this record shares its overflow buffer with another record that
    /// has already appended past the common length (see [`Record::share`]).
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        let mut attrs = attrs.into_iter();
        while self.n_front < NATTRS_INLINE {
            let Some(attr) = attrs.next() else {
                return;
            };
            self.front[self.n_front] = attr;
            self.n_front += 1;
        }

        let mut attrs = attrs.peekable();
        if attrs.peek().is_none() {
            return;
        }
        self.back.check_unaliased();
        self.back.reserve(attrs.size_hint().0);
        for attr in attrs {
            self.back.push(attr);
        }
    }

    /// Parses loosely typed arguments and appends the resulting attributes.
    ///
    /// The arguments are moved out of `args`. When they do not fit inline,
    /// the overflow is sized from the exact attribute count.
    pub fn add_args(&mut self, mut args: impl AsMut<[Arg]>) {
        let args = args.as_mut();
        let spill = count_attrs(args).saturating_sub(NATTRS_INLINE - self.n_front);
        if spill > 0 {
            self.back.check_unaliased();
            self.back.reserve(spill);
        }
        self.add_attrs(take_args(args));
    }

    /// A copy that shares the overflow buffer, including spare capacity.
    ///
    /// Hand the share to exactly one consumer that will not append, or
    /// append only to one side; use `clone` otherwise.
    pub fn share(&self) -> Self {
        Self {
            back: Overflow {
                slots: self.back.slots.clone(),
                len: self.back.len,
                cap: self.back.cap,
            },
            ..self.copy_meta()
        }
    }

    fn copy_meta(&self) -> Self {
        Self {
            time: self.time,
            message: self.message.clone(),
            level: self.level,
            context: self.context.clone(),
            source: self.source,
            front: self.front.clone(),
            n_front: self.n_front,
            back: Overflow::default(),
        }
    }
}

/// The copy's overflow capacity is clipped to its length, so appends on
/// either side never touch the other's storage.
impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            back: Overflow {
                slots: self.back.slots.clone(),
                len: self.back.len,
                cap: self.back.len,
            },
            ..self.copy_meta()
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("time", &self.time)
            .field("level", &self.level)
            .field("message", &self.message)
            .field("source", &self.source())
            .field("attrs", &self.attrs().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Write-once slots. `slots[..len]` are set; `len..cap` are reserved for
/// this record, though a share may hold the same range.
#[derive(Default)]
struct Overflow {
    slots: Option<Arc<[OnceLock<Attr>]>>,
    len: usize,
    cap: usize,
}

impl Overflow {
    fn iter(&self) -> impl Iterator<Item = &Attr> + '_ {
        let filled = match &self.slots {
            Some(slots) => &slots[..self.len],
            None => &[],
        };
        filled.iter().filter_map(OnceLock::get)
    }

    fn check_unaliased(&self) {
        if let Some(slots) = &self.slots {
            if self.len < self.cap && slots[self.len].get().is_some() {
                aliased();
            }
        }
    }

    fn reserve(&mut self, additional: usize) {
        if self.cap - self.len < additional {
            self.grow(additional);
        }
    }

    fn push(&mut self, attr: Attr) {
        if self.len == self.cap {
            self.grow(1);
        }
        let Some(slots) = &self.slots else {
            unreachable!("overflow buffer allocated by grow");
        };
        if slots[self.len].set(attr).is_err() {
            aliased();
        }
        self.len += 1;
    }

    /// Moves to a private buffer with room for `additional` more slots.
    fn grow(&mut self, additional: usize) {
        let cap = (self.len + additional)
            .max(self.cap * 2)
            .max(MIN_OVERFLOW);
        let mut slots = Vec::with_capacity(cap);
        slots.extend(self.iter().cloned().map(OnceLock::from));
        slots.resize_with(cap, OnceLock::new);
        self.slots = Some(slots.into());
        self.cap = cap;
    }
}

#[cold]
#[track_caller]
fn aliased() -> ! {
    panic!("copies of a Record were both modified; use clone to get an independent copy")
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::thread;

    use super::*;
    use crate::args::BAD_KEY;
    use crate::value::Value;

    fn int_attrs(n: usize) -> Vec<Attr> {
        (0..n).map(|i| Attr::int64(format!("k{i}"), i as i64)).collect()
    }

    fn new_record(n: usize) -> Record {
        let mut r = Record::new(Utc::now(), Level::INFO, "msg", None, None);
        r.add_attrs(int_attrs(n));
        r
    }

    fn collect(r: &Record) -> Vec<Attr> {
        r.attrs().cloned().collect()
    }

    #[test]
    fn attrs_keep_order() {
        for n in [0, 3, NATTRS_INLINE, NATTRS_INLINE + 1, 12] {
            let r = new_record(n);
            assert_eq!(r.num_attrs(), n);
            assert_eq!(collect(&r), int_attrs(n));
        }
    }

    #[test]
    fn one_attr_per_call() {
        for n in [3, NATTRS_INLINE, NATTRS_INLINE + 1, 12, 40] {
            let mut r = Record::new(Utc::now(), Level::INFO, "msg", None, None);
            for attr in int_attrs(n) {
                r.add_attrs([attr]);
            }
            assert_eq!(r.num_attrs(), n, "n = {n}");
            assert_eq!(collect(&r), int_attrs(n), "n = {n}");
        }
    }

    #[test]
    fn appends_across_calls() {
        let mut r = new_record(3);
        r.add_attrs(int_attrs(12).split_off(3));
        r.add_attrs(int_attrs(13).split_off(12));
        assert_eq!(collect(&r), int_attrs(13));
    }

    #[test]
    fn iteration_restarts() {
        let r = new_record(8);
        assert_eq!(r.attrs().count(), 8);
        assert_eq!(r.attrs().count(), 8);

        let mut seen = 0;
        r.for_each_attr(|_| {
            seen += 1;
            seen < 6
        });
        assert_eq!(seen, 6);
    }

    #[test]
    fn clone_is_independent() {
        let mut r1 = new_record(NATTRS_INLINE + 2);
        r1.add_attrs([Attr::int64("extra", 1)]);
        let mut r2 = r1.clone();
        r1.add_attrs([Attr::string("side", "one")]);
        r2.add_attrs([Attr::string("side", "two")]);

        let last = |r: &Record| r.attrs().last().cloned();
        assert_eq!(last(&r1), Some(Attr::string("side", "one")));
        assert_eq!(last(&r2), Some(Attr::string("side", "two")));
        assert_eq!(r1.num_attrs(), r2.num_attrs());
    }

    #[test]
    fn share_then_one_side_appends() {
        let mut r1 = new_record(NATTRS_INLINE + 1);
        let r2 = r1.share();
        r1.add_attrs(int_attrs(2));
        assert_eq!(r1.num_attrs(), NATTRS_INLINE + 3);
        assert_eq!(collect(&r2), int_attrs(NATTRS_INLINE + 1));
    }

    #[test]
    #[should_panic(expected = "copies of a Record were both modified")]
    fn share_then_both_append_panics() {
        let mut r1 = new_record(NATTRS_INLINE + 1);
        let mut r2 = r1.share();
        r1.add_attrs([Attr::int64("a", 1)]);
        r2.add_attrs([Attr::int64("b", 2)]);
    }

    #[test]
    fn concurrent_appends_to_shares_are_caught() {
        let r = new_record(NATTRS_INLINE + 1);
        let copies = [r.share(), r.share()];
        let panics = thread::scope(|s| {
            let handles = copies.map(|mut c| {
                s.spawn(move || {
                    catch_unwind(AssertUnwindSafe(|| c.add_attrs([Attr::int64("x", 1)]))).is_err()
                })
            });
            handles.map(|h| h.join().unwrap_or(true))
        });
        assert_eq!(panics.iter().filter(|p| **p).count(), 1);
    }

    #[test]
    fn concurrent_appends_to_clones_succeed() {
        let r = new_record(NATTRS_INLINE + 1);
        let copies = [r.clone(), r.clone()];
        thread::scope(|s| {
            for mut c in copies {
                s.spawn(move || {
                    c.add_attrs(int_attrs(3));
                    assert_eq!(c.num_attrs(), NATTRS_INLINE + 4);
                });
            }
        });
        assert_eq!(r.num_attrs(), NATTRS_INLINE + 1);
    }

    #[test]
    fn slot_past_end_stays_zero() {
        let mut r = new_record(NATTRS_INLINE);
        r.add_attrs(int_attrs(1));
        let slots = r.back.slots.as_ref().expect("overflow allocated");
        assert!(r.back.cap > r.back.len);
        assert!(slots[r.back.len].get().is_none());
    }

    #[test]
    fn source_location() {
        let r = Record::new(Utc::now(), Level::INFO, "m", None, None);
        assert_eq!(r.source(), None);

        let here = Location::caller();
        let r = Record::new(Utc::now(), Level::INFO, "m", None, Some(here));
        let src = r.source().expect("source");
        assert!(src.file.ends_with("record.rs"), "{src}");
        assert_eq!(src.line, here.line());
    }

    #[test]
    fn args_become_attrs() {
        let mut r = Record::new(Utc::now(), Level::WARN, "m", None, None);
        r.add_args(crate::args!["a", 1, Attr::bool("b", true), 2.5, "c"]);
        assert_eq!(
            collect(&r),
            [
                Attr::int64("a", 1),
                Attr::bool("b", true),
                Attr::new(BAD_KEY, Value::float64(2.5)),
                Attr::string(BAD_KEY, "c"),
            ]
        );
    }

    #[test]
    fn args_reserve_exact_overflow() {
        let mut r = Record::new(Utc::now(), Level::INFO, "m", None, None);
        let mut args = Vec::new();
        for i in 0..12 {
            args.push(Arg::from(format!("k{i}")));
            args.push(Arg::from(i));
        }
        r.add_args(args);
        assert_eq!(r.back.cap, 7);
        assert_eq!(r.num_attrs(), 12);
        assert_eq!(collect(&r), int_attrs(12));

        let mut r = new_record(3);
        r.add_args(crate::args!["a", 1, Attr::bool("b", true), "c", 3, "d", 4, 5]);
        assert_eq!(r.num_attrs(), 8);
        assert_eq!(r.back.cap, MIN_OVERFLOW);
        assert_eq!(r.back.len, 3);
    }

    #[test]
    fn context_is_carried_untouched() {
        let ctx: Context = Arc::new(String::from("req-7"));
        let r = Record::new(Utc::now(), Level::INFO, "m", Some(ctx.clone()), None);
        let copy = r.clone();
        let got = copy.context.as_ref().expect("context");
        assert!(Arc::ptr_eq(got, &ctx));
        assert_eq!(got.downcast_ref::<String>().map(String::as_str), Some("req-7"));
    }
}
