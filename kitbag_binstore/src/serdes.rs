//! Per-value codecs turning typed settings into raw byte payloads.
//!
//! Every codec carries its own default value, supplied at construction.
//! The crate-wide contract is that `deserialize(reset())` succeeds: a codec
//! whose default cannot round-trip is a programming error and aborts at
//! construction time.
//!
//! Scalar payloads are the value's native in-memory bytes, so the format is
//! host-endian and host-width by design.

use kitbag_core::bug;
use num_enum::TryFromPrimitive;

use crate::types::ByteArray;

/// A stateless serializer/deserializer for one setting type.
pub trait SerDes {
    type Value;

    /// Canonical byte encoding of `value`, or `None` when the value is
    /// outside the codec's accepted range.
    fn serialize(&self, value: &Self::Value) -> Option<ByteArray>;

    /// Inverse of [`serialize`](Self::serialize); `None` on any malformed
    /// payload.
    fn deserialize(&self, bytes: &ByteArray) -> Option<Self::Value>;

    /// Encoding of the configured default value.
    fn reset(&self) -> ByteArray;
}

/// Fixed-width primitives persisted through their native byte representation.
pub trait Scalar: Copy + PartialOrd + std::fmt::Debug {
    const SIZE: usize;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;

    fn write_ne(self, out: &mut ByteArray);
    fn read_ne(bytes: &[u8]) -> Self;

    /// Whether the value may serve as a range bound.
    fn valid_bound(self) -> bool {
        true
    }
}

macro_rules! impl_int_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const ZERO: Self = 0;

            fn write_ne(self, out: &mut ByteArray) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            fn read_ne(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(buf)
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const ZERO: Self = 0.0;

            fn write_ne(self, out: &mut ByteArray) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            fn read_ne(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(buf)
            }

            fn valid_bound(self) -> bool {
                self.is_finite()
            }
        }
    )*};
}

impl_int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_scalar!(f32, f64);

/// Codec for integral and floating-point settings with inclusive bounds.
///
/// [`Default`] gives the full-range codec around the type's zero.
#[derive(Debug, Clone, Copy)]
pub struct ScalarSerDes<T> {
    min: T,
    max: T,
    default: T,
}

impl<T: Scalar> ScalarSerDes<T> {
    /// Full-range codec around `default`.
    pub fn new(default: T) -> Self {
        Self::bounded(T::MIN, T::MAX, default)
    }

    /// Codec accepting only `[min, max]`. Non-finite or inverted bounds and
    /// an out-of-range default are caller bugs.
    pub fn bounded(min: T, max: T, default: T) -> Self {
        if !min.valid_bound() || !max.valid_bound() {
            bug!("codec bounds must be finite, got [{min:?}, {max:?}]");
        }
        if min > max {
            bug!("codec bounds are inverted: [{min:?}, {max:?}]");
        }
        if default < min || default > max {
            bug!("codec default {default:?} is outside [{min:?}, {max:?}]");
        }
        Self { min, max, default }
    }
}

impl<T: Scalar> Default for ScalarSerDes<T> {
    fn default() -> Self {
        Self {
            min: T::MIN,
            max: T::MAX,
            default: T::ZERO,
        }
    }
}

impl<T: Scalar> SerDes for ScalarSerDes<T> {
    type Value = T;

    fn serialize(&self, value: &T) -> Option<ByteArray> {
        if *value > self.max || *value < self.min {
            return None;
        }
        let mut out = ByteArray::with_capacity(T::SIZE);
        value.write_ne(&mut out);
        Some(out)
    }

    fn deserialize(&self, bytes: &ByteArray) -> Option<T> {
        if bytes.len() != T::SIZE {
            return None;
        }
        let value = T::read_ne(bytes);
        if value > self.max || value < self.min {
            return None;
        }
        Some(value)
    }

    fn reset(&self) -> ByteArray {
        match self.serialize(&self.default) {
            Some(bytes) => bytes,
            None => bug!("codec default {:?} does not serialize", self.default),
        }
    }
}

/// Codec for booleans: one byte, nonzero meaning true.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSerDes {
    default: bool,
}

impl BoolSerDes {
    pub fn new(default: bool) -> Self {
        Self { default }
    }
}

impl SerDes for BoolSerDes {
    type Value = bool;

    fn serialize(&self, value: &bool) -> Option<ByteArray> {
        Some(vec![u8::from(*value)])
    }

    fn deserialize(&self, bytes: &ByteArray) -> Option<bool> {
        match bytes.as_slice() {
            [byte] => Some(*byte != 0),
            _ => None,
        }
    }

    fn reset(&self) -> ByteArray {
        vec![u8::from(self.default)]
    }
}

/// Codec for fieldless enums, persisted through their discriminant type.
///
/// Unknown discriminants fail deserialization, so widening an enum across
/// schema versions falls back to the default cleanly.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumSerDes<E> {
    default: E,
}

impl<E> EnumSerDes<E> {
    pub fn new(default: E) -> Self {
        Self { default }
    }
}

impl<E> SerDes for EnumSerDes<E>
where
    E: TryFromPrimitive + Into<<E as TryFromPrimitive>::Primitive> + Copy,
    <E as TryFromPrimitive>::Primitive: Scalar,
{
    type Value = E;

    fn serialize(&self, value: &E) -> Option<ByteArray> {
        let raw: E::Primitive = (*value).into();
        let mut out = ByteArray::with_capacity(<E::Primitive as Scalar>::SIZE);
        raw.write_ne(&mut out);
        Some(out)
    }

    fn deserialize(&self, bytes: &ByteArray) -> Option<E> {
        if bytes.len() != <E::Primitive as Scalar>::SIZE {
            return None;
        }
        E::try_from_primitive(<E::Primitive as Scalar>::read_ne(bytes)).ok()
    }

    fn reset(&self) -> ByteArray {
        match self.serialize(&self.default) {
            Some(bytes) => bytes,
            None => bug!("enum codec default does not serialize"),
        }
    }
}

/// Codec for UTF-8 strings: an 8-byte native-order length header followed by
/// exactly that many bytes.
#[derive(Debug, Clone, Default)]
pub struct StringSerDes {
    default: String,
}

/// Width of the string length header.
const STRING_HEADER: usize = std::mem::size_of::<u64>();

impl StringSerDes {
    pub fn new(default: &str) -> Self {
        Self {
            default: default.to_owned(),
        }
    }
}

impl SerDes for StringSerDes {
    type Value = String;

    fn serialize(&self, value: &String) -> Option<ByteArray> {
        let mut out = ByteArray::with_capacity(STRING_HEADER + value.len());
        out.extend_from_slice(&(value.len() as u64).to_ne_bytes());
        out.extend_from_slice(value.as_bytes());
        Some(out)
    }

    fn deserialize(&self, bytes: &ByteArray) -> Option<String> {
        let header = bytes.get(..STRING_HEADER)?;
        let length = usize::try_from(u64::from_ne_bytes(header.try_into().ok()?)).ok()?;
        let payload = &bytes[STRING_HEADER..];
        if payload.len() != length {
            return None;
        }
        String::from_utf8(payload.to_vec()).ok()
    }

    fn reset(&self) -> ByteArray {
        match self.serialize(&self.default) {
            Some(bytes) => bytes,
            None => bug!("string codec default does not serialize"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_enum::{IntoPrimitive, TryFromPrimitive};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
    #[repr(i8)]
    enum Mode {
        #[default]
        Off,
        Slow,
        Fast,
    }

    fn round_trip<S: SerDes>(codec: &S, value: &S::Value) -> Option<S::Value> {
        codec.deserialize(&codec.serialize(value)?)
    }

    #[test]
    fn scalar_round_trips() {
        let codec = ScalarSerDes::<i32>::default();
        assert_eq!(round_trip(&codec, &114), Some(114));
        assert_eq!(round_trip(&codec, &-1), Some(-1));

        let codec = ScalarSerDes::<f64>::default();
        assert_eq!(round_trip(&codec, &2.5), Some(2.5));
    }

    #[test]
    fn scalar_rejects_wrong_length_and_out_of_range() {
        let codec = ScalarSerDes::bounded(-1.0f32, 1.0, 0.0);
        assert_eq!(codec.serialize(&2.0), None);
        assert_eq!(codec.deserialize(&vec![0u8; 3]), None);
        // In-range bytes decode, out-of-range bytes do not.
        let wide = ScalarSerDes::<f32>::default();
        let raw = wide.serialize(&2.0).expect("full-range serialize");
        assert_eq!(codec.deserialize(&raw), None);
    }

    #[test]
    fn scalar_default_round_trips_through_reset() {
        let codec = ScalarSerDes::bounded(0u16, 100, 42);
        assert_eq!(codec.deserialize(&codec.reset()), Some(42));
    }

    #[test]
    fn bool_accepts_any_nonzero_byte() {
        let codec = BoolSerDes::default();
        assert_eq!(codec.deserialize(&vec![0]), Some(false));
        assert_eq!(codec.deserialize(&vec![1]), Some(true));
        assert_eq!(codec.deserialize(&vec![7]), Some(true));
        assert_eq!(codec.deserialize(&vec![1, 0]), None);
        assert_eq!(round_trip(&codec, &true), Some(true));
    }

    #[test]
    fn enum_round_trips_and_rejects_unknown_discriminants() {
        let codec = EnumSerDes::<Mode>::default();
        assert_eq!(round_trip(&codec, &Mode::Fast), Some(Mode::Fast));
        assert_eq!(codec.deserialize(&vec![100u8]), None);
        assert_eq!(codec.deserialize(&codec.reset()), Some(Mode::Off));
    }

    #[test]
    fn string_round_trips_and_checks_lengths() {
        let codec = StringSerDes::default();
        assert_eq!(
            round_trip(&codec, &"\u{4F60}\u{597D}".to_owned()),
            Some("\u{4F60}\u{597D}".to_owned())
        );
        assert_eq!(codec.deserialize(&codec.reset()), Some(String::new()));

        // Truncated header.
        assert_eq!(codec.deserialize(&vec![1, 2, 3]), None);
        // Header longer than the payload.
        let mut raw = ByteArray::new();
        raw.extend_from_slice(&9u64.to_ne_bytes());
        raw.extend_from_slice(b"short");
        assert_eq!(codec.deserialize(&raw), None);
        // Payload that is not UTF-8.
        let mut raw = ByteArray::new();
        raw.extend_from_slice(&1u64.to_ne_bytes());
        raw.push(0xFF);
        assert_eq!(codec.deserialize(&raw), None);
    }
}
