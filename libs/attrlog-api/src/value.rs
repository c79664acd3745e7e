use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Utc};

use crate::attr::Attr;
use crate::display::{fmt_duration, fmt_float, fmt_time};
use crate::kind::Kind;
use crate::level::Level;
use crate::resolve::LogValuer;
use crate::text::SharedStr;

/// Payload of a single attribute.
///
/// Strategy by kind:
/// - Bool, Int64, Uint64, Float64, Duration, Time: inline, never allocate
/// - String: `'static` text inline, owned text behind one `Arc`
/// - Group, LogValuer, Any: one shared reference, except levels, which
///   are kept inline
///
/// A `Value` never changes after construction. Clones share the
/// reference payload.
#[derive(Clone, Default)]
pub struct Value(Repr);

#[derive(Clone, Default)]
enum Repr {
    #[default]
    Empty,
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(SharedStr),
    Duration(Duration),
    Time(DateTime<FixedOffset>),
    Group(Arc<[Attr]>),
    LogValuer(Arc<dyn LogValuer>),
    /// Kind `Any` without the allocation.
    Level(Level),
    Any(Arc<dyn Opaque>),
}

// ---------------------------------------------------------------------------
// Opaque payloads (Kind::Any)
// ---------------------------------------------------------------------------

/// Type-erased payload of an `Any` value.
pub(crate) trait Opaque: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    fn eq_opaque(&self, other: &dyn Opaque) -> bool;

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        None
    }
}

/// Compared with the payload's own `PartialEq`, rendered with `Debug`.
struct Structural<T>(T);

impl<T> Opaque for Structural<T>
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|o| *o == self.0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Compared by identity of the allocation, rendered as the type name.
struct Shared<T>(Arc<T>);

impl<T: Any + Send + Sync> Opaque for Shared<T> {
    fn as_any(&self) -> &dyn Any {
        &*self.0
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|o| std::ptr::eq(o, &*self.0))
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", std::any::type_name::<T>(), Arc::as_ptr(&self.0))
    }
}

/// Compared by identity, rendered with `Display`.
struct SharedError(Arc<dyn Error + Send + Sync>);

impl Opaque for SharedError {
    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_error()
            .is_some_and(|o| std::ptr::addr_eq(o, &*self.0))
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }

    fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        Some(&*self.0)
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl Value {
    pub const fn bool(v: bool) -> Self {
        Self(Repr::Bool(v))
    }

    pub const fn int64(v: i64) -> Self {
        Self(Repr::Int64(v))
    }

    /// Platform integer, stored as `Int64`.
    pub const fn int(v: isize) -> Self {
        Self(Repr::Int64(v as i64))
    }

    pub const fn uint64(v: u64) -> Self {
        Self(Repr::Uint64(v))
    }

    pub const fn float64(v: f64) -> Self {
        Self(Repr::Float64(v))
    }

    pub fn string(s: impl Into<SharedStr>) -> Self {
        Self(Repr::String(s.into()))
    }

    pub const fn duration(d: Duration) -> Self {
        Self(Repr::Duration(d))
    }

    pub fn time(t: DateTime<Utc>) -> Self {
        Self(Repr::Time(t.fixed_offset()))
    }

    /// A time that keeps its offset.
    pub fn time_with_offset(t: DateTime<FixedOffset>) -> Self {
        Self(Repr::Time(t))
    }

    /// Ordered attributes. Keys need not be unique.
    pub fn group(attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self(Repr::Group(attrs.into_iter().collect()))
    }

    pub fn log_valuer(v: impl LogValuer + 'static) -> Self {
        Self::log_valuer_arc(Arc::new(v))
    }

    /// Wraps an existing shared valuer; equality is by identity of `v`.
    pub fn log_valuer_arc(v: Arc<dyn LogValuer>) -> Self {
        Self(Repr::LogValuer(v))
    }

    /// Wraps a value of any other type as kind `Any`.
    ///
    /// Passing another `Value` wraps it instead of returning it; use
    /// `Value::from` for the identity conversion.
    pub fn opaque<T>(v: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq + Send + Sync,
    {
        Self(Repr::Any(Arc::new(Structural(v))))
    }

    /// Wraps a shared handle of any type as kind `Any`.
    ///
    /// Equality is identity: two values are equal only when they hold the
    /// same allocation. No trait bounds beyond thread safety are needed, so
    /// this also covers locks, channels and other handles.
    pub fn opaque_arc<T: Any + Send + Sync>(v: Arc<T>) -> Self {
        Self(Repr::Any(Arc::new(Shared(v))))
    }

    /// An error as kind `Any`, rendered with its `Display` form.
    pub fn error(e: impl Error + Send + Sync + 'static) -> Self {
        Self::shared_error(Arc::new(e))
    }

    pub fn shared_error(e: Arc<dyn Error + Send + Sync>) -> Self {
        Self(Repr::Any(Arc::new(SharedError(e))))
    }

    pub(crate) fn from_opaque(v: Arc<dyn Opaque>) -> Self {
        Self(Repr::Any(v))
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Value {
    pub fn kind(&self) -> Kind {
        match &self.0 {
            Repr::Empty => Kind::Empty,
            Repr::Bool(_) => Kind::Bool,
            Repr::Int64(_) => Kind::Int64,
            Repr::Uint64(_) => Kind::Uint64,
            Repr::Float64(_) => Kind::Float64,
            Repr::String(_) => Kind::String,
            Repr::Duration(_) => Kind::Duration,
            Repr::Time(_) => Kind::Time,
            Repr::Group(_) => Kind::Group,
            Repr::LogValuer(_) => Kind::LogValuer,
            Repr::Level(_) | Repr::Any(_) => Kind::Any,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    /// # Panics
    ///
    /// If the kind is not `Bool`. The same holds for every `as_*` accessor.
    #[track_caller]
    pub fn as_bool(&self) -> bool {
        match self.0 {
            Repr::Bool(v) => v,
            _ => self.kind_mismatch(Kind::Bool),
        }
    }

    #[track_caller]
    pub fn as_int64(&self) -> i64 {
        match self.0 {
            Repr::Int64(v) => v,
            _ => self.kind_mismatch(Kind::Int64),
        }
    }

    #[track_caller]
    pub fn as_uint64(&self) -> u64 {
        match self.0 {
            Repr::Uint64(v) => v,
            _ => self.kind_mismatch(Kind::Uint64),
        }
    }

    #[track_caller]
    pub fn as_float64(&self) -> f64 {
        match self.0 {
            Repr::Float64(v) => v,
            _ => self.kind_mismatch(Kind::Float64),
        }
    }

    #[track_caller]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::String(s) => s,
            _ => self.kind_mismatch(Kind::String),
        }
    }

    #[track_caller]
    pub fn as_duration(&self) -> Duration {
        match self.0 {
            Repr::Duration(d) => d,
            _ => self.kind_mismatch(Kind::Duration),
        }
    }

    #[track_caller]
    pub fn as_time(&self) -> DateTime<FixedOffset> {
        match &self.0 {
            Repr::Time(t) => *t,
            _ => self.kind_mismatch(Kind::Time),
        }
    }

    #[track_caller]
    pub fn as_group(&self) -> &[Attr] {
        match &self.0 {
            Repr::Group(attrs) => attrs,
            _ => self.kind_mismatch(Kind::Group),
        }
    }

    #[track_caller]
    pub fn as_log_valuer(&self) -> &Arc<dyn LogValuer> {
        match &self.0 {
            Repr::LogValuer(v) => v,
            _ => self.kind_mismatch(Kind::LogValuer),
        }
    }

    /// The payload as a dynamically typed reference. `None` only for the
    /// empty value.
    ///
    /// | Kind | Payload type |
    /// |---|---|
    /// | Bool, Int64, Uint64, Float64 | `bool`, `i64`, `u64`, `f64` |
    /// | String | [`SharedStr`] |
    /// | Duration | `std::time::Duration` |
    /// | Time | `DateTime<FixedOffset>` |
    /// | Group | `Arc<[Attr]>` |
    /// | LogValuer | `Arc<dyn LogValuer>` |
    /// | Any | the wrapped value |
    pub fn any(&self) -> Option<&dyn Any> {
        match &self.0 {
            Repr::Empty => None,
            Repr::Bool(v) => Some(v),
            Repr::Int64(v) => Some(v),
            Repr::Uint64(v) => Some(v),
            Repr::Float64(v) => Some(v),
            Repr::String(s) => Some(s),
            Repr::Duration(d) => Some(d),
            Repr::Time(t) => Some(t),
            Repr::Group(attrs) => Some(attrs),
            Repr::LogValuer(v) => Some(v),
            Repr::Level(level) => Some(level),
            Repr::Any(v) => Some(v.as_any()),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.any()?.downcast_ref()
    }

    /// The error of a value built with [`Value::error`] or [`Value::shared_error`].
    pub fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match &self.0 {
            Repr::Any(v) => v.as_error(),
            _ => None,
        }
    }

    pub(crate) fn log_valuer_ref(&self) -> Option<&Arc<dyn LogValuer>> {
        match &self.0 {
            Repr::LogValuer(v) => Some(v),
            _ => None,
        }
    }

    #[cold]
    #[track_caller]
    fn kind_mismatch(&self, want: Kind) -> ! {
        panic!("Value kind is {}, not {want}", self.kind())
    }
}

// ---------------------------------------------------------------------------
// Equality & formatting
// ---------------------------------------------------------------------------

impl PartialEq for Value {
    /// Floats compare by bit pattern, so every value equals itself.
    /// Times compare by instant. Log valuers compare by identity. A level
    /// equals the same level wrapped with [`Value::opaque`].
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Empty, Repr::Empty) => true,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::Int64(a), Repr::Int64(b)) => a == b,
            (Repr::Uint64(a), Repr::Uint64(b)) => a == b,
            (Repr::Float64(a), Repr::Float64(b)) => a.to_bits() == b.to_bits(),
            (Repr::String(a), Repr::String(b)) => a == b,
            (Repr::Duration(a), Repr::Duration(b)) => a == b,
            (Repr::Time(a), Repr::Time(b)) => a == b,
            (Repr::Group(a), Repr::Group(b)) => a[..] == b[..],
            (Repr::LogValuer(a), Repr::LogValuer(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Repr::Level(a), Repr::Level(b)) => a == b,
            (Repr::Level(a), Repr::Any(b)) | (Repr::Any(b), Repr::Level(a)) => {
                b.as_any().downcast_ref::<Level>() == Some(a)
            }
            (Repr::Any(a), Repr::Any(b)) => a.eq_opaque(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Empty => Ok(()),
            Repr::Bool(v) => fmt::Display::fmt(v, f),
            Repr::Int64(v) => fmt::Display::fmt(v, f),
            Repr::Uint64(v) => fmt::Display::fmt(v, f),
            Repr::Float64(v) => fmt_float(*v, f),
            Repr::String(s) => f.write_str(s),
            Repr::Duration(d) => fmt_duration(*d, f),
            Repr::Time(t) => fmt_time(t, f),
            Repr::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{attr}")?;
                }
                f.write_str("]")
            }
            Repr::LogValuer(_) => f.write_str("LogValuer"),
            Repr::Level(level) => fmt::Display::fmt(level, f),
            Repr::Any(v) => v.render(f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Empty => f.write_str("Empty"),
            Repr::String(s) => write!(f, "String({s:?})"),
            Repr::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            _ => write!(f, "{}({self})", self.kind()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::int64(v as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::uint64(v as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::float64(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float64(v)
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::string(s)
    }
}

impl From<SharedStr> for Value {
    fn from(s: SharedStr) -> Self {
        Value::string(s)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::time(t)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::time_with_offset(t)
    }
}

impl From<SystemTime> for Value {
    fn from(t: SystemTime) -> Self {
        Value::time(DateTime::<Utc>::from(t))
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value(Repr::Level(level))
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value(Repr::Group(attrs.into()))
    }
}

/// `None` becomes the empty value.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Value::default, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn equality_matrix() {
        let err = Arc::new(std::io::Error::other("boom")) as Arc<dyn Error + Send + Sync>;
        let vals = [
            Value::default(),
            Value::int64(1),
            Value::int64(2),
            Value::uint64(1),
            Value::float64(3.5),
            Value::float64(3.7),
            Value::bool(true),
            Value::bool(false),
            Value::string("a"),
            Value::string("b"),
            Value::duration(Duration::from_secs(1)),
            Value::time(test_time()),
            Value::opaque_arc(Arc::new(Mutex::new(0))),
            Value::opaque_arc(Arc::new(Mutex::new(0))),
            Value::from(Level::WARN),
            Value::shared_error(err),
            Value::group([Attr::new("b", true), Attr::new("i", 3)]),
            Value::group([Attr::new("i", 3), Attr::new("b", true)]),
        ];
        for (i, v1) in vals.iter().enumerate() {
            for (j, v2) in vals.iter().enumerate() {
                assert_eq!(v1 == v2, i == j, "{v1:?} == {v2:?}");
            }
        }
    }

    #[test]
    fn structural_any_compares_by_content() {
        assert_eq!(Value::opaque(vec![1, 2]), Value::opaque(vec![1, 2]));
        assert_ne!(Value::opaque(vec![1, 2]), Value::opaque(vec![2, 1]));
        assert_ne!(Value::opaque(1u8), Value::opaque(1u16));
    }

    #[test]
    fn shared_handle_compares_by_identity() {
        let handle = Arc::new(Mutex::new(vec![1u8]));
        let a = Value::opaque_arc(handle.clone());
        let b = Value::opaque_arc(handle.clone());
        let other = Value::opaque_arc(Arc::new(Mutex::new(vec![1u8])));

        assert_eq!(a, a.clone());
        assert_eq!(a, b);
        assert_ne!(a, other);
        assert_ne!(a, Value::opaque_arc(Arc::new(0u8)));
        assert_eq!(a.kind(), Kind::Any);

        let inner = a.downcast_ref::<Mutex<Vec<u8>>>().expect("payload");
        assert!(std::ptr::eq(inner, &*handle));
        inner.lock().unwrap().push(2);
        assert_eq!(*handle.lock().unwrap(), [1, 2]);

        let shown = a.to_string();
        assert!(shown.starts_with("std::sync::"), "{shown}");
        assert!(shown.contains("Mutex<alloc::vec::Vec<u8>>@0x"), "{shown}");
    }

    #[test]
    fn shared_error_compares_by_identity() {
        let err = Arc::new(std::io::Error::other("boom")) as Arc<dyn Error + Send + Sync>;
        let a = Value::shared_error(err.clone());
        let b = Value::shared_error(err);
        assert_eq!(a, b);
        assert_ne!(a, Value::error(std::io::Error::other("boom")));
    }

    #[test]
    fn offset_does_not_affect_equality() {
        let utc = Value::time(test_time());
        let cet = FixedOffset::east_opt(3600).unwrap();
        let shifted = Value::time_with_offset(test_time().with_timezone(&cet));
        assert_eq!(utc, shifted);
        assert_eq!(shifted.as_time(), test_time());
        assert_ne!(utc.to_string(), shifted.to_string());
    }

    #[test]
    fn out_of_range_time_round_trips() {
        let far = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();
        let v = Value::time(far);
        assert_eq!(v.kind(), Kind::Time);
        assert_eq!(v.as_time(), far);
        assert_eq!(v, Value::from(far));
    }

    #[test]
    fn none_is_empty() {
        let v = Value::from(None::<i64>);
        assert_eq!(v.kind(), Kind::Empty);
        assert!(v.any().is_none());
        assert_eq!(v, Value::default());
        assert_ne!(v, Value::int64(0));
    }

    #[test]
    fn string_forms() {
        for (v, want) in [
            (Value::int64(-3), "-3"),
            (Value::float64(0.15), "0.15"),
            (Value::float64(1e21), "1e+21"),
            (Value::float64(1.5e-5), "1.5e-05"),
            (Value::float64(f64::INFINITY), "+Inf"),
            (Value::from(Level::new(1)), "INFO+1"),
            (Value::bool(true), "true"),
            (Value::string("foo"), "foo"),
            (Value::time(test_time()), "2000-01-02 03:04:05 +0000 UTC"),
            (Value::from(Duration::from_secs(3)), "3s"),
            (Value::group([Attr::new("a", 1), Attr::new("b", "x")]), "[a=1 b=x]"),
            (Value::opaque(vec![1, 2]), "[1, 2]"),
            (Value::error(std::io::Error::other("boom")), "boom"),
            (Value::default(), ""),
        ] {
            assert_eq!(v.to_string(), want);
        }
    }

    #[test]
    fn conversions() {
        let cases: [(Value, Value); 10] = [
            (1.into(), Value::int64(1)),
            (1.5.into(), Value::float64(1.5)),
            ("s".into(), Value::string("s")),
            (String::from("s").into(), Value::string("s")),
            (2u32.into(), Value::uint64(2)),
            (true.into(), Value::bool(true)),
            (test_time().into(), Value::time(test_time())),
            (Duration::from_secs(3600).into(), Value::duration(Duration::from_secs(3600))),
            (vec![Attr::new("i", 3)].into(), Value::group([Attr::new("i", 3)])),
            (Value::from(Value::int64(4)), Value::int64(4)),
        ];
        for (got, want) in cases {
            assert_eq!(got.kind(), want.kind());
            assert_eq!(got, want);
        }
    }

    #[test]
    fn opaque_payload_is_recoverable() {
        let v = Value::opaque(Kind::Bool);
        assert_eq!(v.kind(), Kind::Any);
        assert_eq!(v.downcast_ref::<Kind>(), Some(&Kind::Bool));
        assert!(v.downcast_ref::<u8>().is_none());
    }

    #[test]
    fn every_kind_but_empty_has_a_payload() {
        assert_eq!(Value::bool(true).downcast_ref::<bool>(), Some(&true));
        assert_eq!(Value::int64(-1).downcast_ref::<i64>(), Some(&-1));
        assert_eq!(Value::uint64(1).downcast_ref::<u64>(), Some(&1));
        assert_eq!(Value::float64(0.5).downcast_ref::<f64>(), Some(&0.5));
        assert!(Value::int64(1).downcast_ref::<u64>().is_none());

        let s = Value::string(String::from("owned"));
        assert_eq!(s.downcast_ref::<SharedStr>().map(|s| &**s), Some("owned"));

        let d = Duration::from_millis(5);
        assert_eq!(Value::duration(d).downcast_ref::<Duration>(), Some(&d));
        assert_eq!(
            Value::time(test_time()).downcast_ref::<DateTime<FixedOffset>>(),
            Some(&test_time().fixed_offset())
        );

        let g = Value::group([Attr::new("k", 1)]);
        let attrs = g.downcast_ref::<Arc<[Attr]>>().expect("group payload");
        assert_eq!(attrs[..], [Attr::new("k", 1)]);

        struct Const;
        impl LogValuer for Const {
            fn log_value(&self) -> Value {
                Value::string("replaced")
            }
        }
        let lv = Value::log_valuer(Const);
        assert!(lv.downcast_ref::<Arc<dyn LogValuer>>().is_some());
        let resolved = lv.resolve();
        assert_eq!(
            resolved.downcast_ref::<SharedStr>().map(|s| &**s),
            Some("replaced")
        );

        assert!(Value::default().any().is_none());
    }

    #[test]
    fn accessors_return_payload() {
        assert!(Value::bool(true).as_bool());
        assert_eq!(Value::uint64(7).as_uint64(), 7);
        assert_eq!(Value::string("x").as_str(), "x");
        assert_eq!(Value::group([Attr::new("k", 1)]).as_group().len(), 1);
    }

    #[test]
    #[should_panic(expected = "Value kind is Int64, not String")]
    fn mismatched_accessor_panics() {
        Value::int64(1).as_str();
    }

    #[test]
    #[should_panic(expected = "Value kind is Empty, not Bool")]
    fn empty_accessor_panics() {
        Value::default().as_bool();
    }

    proptest! {
        #[test]
        fn int_equality_follows_payload(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Value::int64(a) == Value::int64(b), a == b);
            prop_assert_ne!(Value::int64(a), Value::uint64(a as u64));
        }

        #[test]
        fn float_equality_is_reflexive(x in any::<f64>()) {
            prop_assert_eq!(Value::float64(x), Value::float64(x));
        }

        #[test]
        fn strings_compare_by_content(s in ".*") {
            prop_assert_eq!(Value::string(s.clone()), Value::from(s));
        }
    }
}
