use pretty_assertions::assert_eq;

use crate::{
    Half, Interp, PayloadKind, Ptr, TypedValue, UString, ValueError, test_utils::init_test_logging,
};
use paramval_types::*;

fn floats(value: &TypedValue) -> Vec<f32> {
    value.values::<f32>().collect()
}

#[test]
fn test_small_value_is_inline() {
    let value = TypedValue::from_scalar("fov", 45.0f32);
    assert_eq!(value.type_desc(), TYPE_FLOAT);
    assert_eq!(value.nvalues(), 1);
    assert_eq!(value.datasize(), 4);
    assert!(value.is_inline());
    assert!(!value.owns_heap());
}

#[test]
fn test_large_value_owns_heap() {
    let value = TypedValue::from_slice("worldtocamera", TYPE_MATRIX44, &[0.0f32; 16]).unwrap();
    assert_eq!(value.datasize(), 64);
    assert_eq!(value.storage(), PayloadKind::Owned);
    assert!(value.owns_heap());
}

#[test]
fn test_borrowed_value_points_at_caller_data() {
    let source: Vec<u8> = (0..64).collect();
    let value = TypedValue::borrowed("blob", TYPE_UINT8.array(64), 1, &source).unwrap();
    assert!(value.is_borrowed());
    assert!(!value.owns_heap());
    assert_eq!(value.data().as_ptr(), source.as_ptr());
    assert_eq!(value.get::<u8>(63), Some(63));
}

#[test]
fn test_borrowed_small_value_is_copied_inline() {
    let source = 7i32.to_ne_bytes();
    let value = TypedValue::borrowed("n", TYPE_INT, 1, &source).unwrap();
    assert!(value.is_inline());
    assert_eq!(value.get_int(0), 7);
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        TypedValue::from_bytes("x", TYPE_INT, 2, &[0u8; 4]).unwrap_err(),
        ValueError::DataLength {
            expected: 8,
            actual: 4
        }
    );
    assert_eq!(
        TypedValue::from_slice("x", TYPE_INT, &[1.0f32]).unwrap_err(),
        ValueError::TypeMismatch {
            expected: TYPE_INT,
            actual: BaseType::Float
        }
    );
    assert_eq!(
        TypedValue::from_slice("x", TYPE_COLOR, &[1.0f32; 4]).unwrap_err(),
        ValueError::ComponentCount {
            expected: 3,
            actual: 4
        }
    );
    assert!(matches!(
        TypedValue::zeroed("x", TYPE_MATRIX44, usize::MAX),
        Err(ValueError::SizeOverflow { .. })
    ));
}

#[test]
fn test_from_bytes_reinterns_strings() {
    let known = UString::new("known-handle");
    let mut data = [0u8; 16];
    data[..8].copy_from_slice(&u64::from(known.id()).to_ne_bytes());
    data[8..].copy_from_slice(&u64::from(u32::MAX).to_ne_bytes());

    let value = TypedValue::from_bytes("names", TYPE_STRING, 2, &data).unwrap();
    assert_eq!(value.get::<UString>(0), Some(known));
    assert_eq!(value.get::<UString>(1), Some(UString::EMPTY));
}

#[test]
fn test_borrowed_foreign_strings_are_copied() {
    let data: Vec<u8> = core::iter::repeat_n(u64::MAX.to_ne_bytes(), 4)
        .flatten()
        .collect();
    let value = TypedValue::borrowed("names", TYPE_STRING.array(4), 1, &data).unwrap();
    assert!(value.owns_heap());
    assert!(value.values::<UString>().all(UString::is_empty));
}

#[test]
fn test_parse_fills_array_in_order() {
    let value = TypedValue::parse("weights", TYPE_FLOAT.array(3), "1,2,3");
    assert_eq!(floats(&value), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_parse_short_input_leaves_zeros() {
    let value = TypedValue::parse("weights", TYPE_FLOAT.array(3), "1,2");
    assert_eq!(floats(&value), vec![1.0, 2.0, 0.0]);
}

#[test]
fn test_parse_mixed_delimiters() {
    let value = TypedValue::parse("tint", TYPE_COLOR, " 0.5\t0.25 , 1");
    assert_eq!(floats(&value), vec![0.5, 0.25, 1.0]);
}

#[test]
fn test_parse_never_rejects_input() {
    assert_eq!(TypedValue::parse("n", TYPE_INT, "12abc").get_int(-1), 12);
    assert_eq!(TypedValue::parse("n", TYPE_INT, "abc").get_int(-1), 0);
    assert_eq!(TypedValue::parse("n", TYPE_INT, "").get_int(-1), 0);
    let ptr = TypedValue::parse("p", TYPE_PTR, "0x1234");
    assert_eq!(ptr.get::<Ptr>(0), Some(Ptr(0)));
}

#[test]
fn test_parse_string_keeps_whole_text() {
    let value = TypedValue::parse("caption", TYPE_STRING, "hello, world");
    assert_eq!(value.get_ustring(0), "hello, world");
    assert_eq!(value.get_string(0), "\"hello, world\"");
}

#[test]
fn test_string_round_trip() {
    let original = TypedValue::from_scalar("x", 3.5f32);
    let text = original.get_string(0);
    assert_eq!(text, "3.5");
    assert_eq!(TypedValue::parse("x", TYPE_FLOAT, &text), original);

    let original = TypedValue::from_scalar("x", -17i32);
    assert_eq!(TypedValue::parse("x", TYPE_INT, &original.get_string(0)), original);

    let original = TypedValue::from_scalar("x", 0.1f64);
    let parsed = TypedValue::parse("x", TYPE_DOUBLE, &original.get_string(0));
    assert_eq!(parsed.get::<f64>(0), Some(0.1));
}

#[test]
fn test_get_int_converts_or_falls_back() {
    assert_eq!(TypedValue::from_scalar("x", 2.75f32).get_int(-1), 2);
    assert_eq!(TypedValue::from_scalar("x", 300u16).get_int(-1), 300);
    assert_eq!(TypedValue::string("x", "42").get_int(-1), 42);
    assert_eq!(TypedValue::string("x", "nope").get_int(-1), -1);
    assert_eq!(TypedValue::from_scalar("x", Ptr(16)).get_int(-1), -1);
}

#[test]
fn test_get_indexed_uses_component_offset() {
    let value = TypedValue::from_slice("counts", TYPE_INT.array(3), &[1, 2, 3]).unwrap();
    assert_eq!(value.get_int_indexed(2, -1), 3);
    assert_eq!(value.get_int_indexed(3, -1), -1);
    assert_eq!(value.get_float_indexed(1, -1.0), 2.0);
}

#[test]
fn test_get_float_from_rational_and_half() {
    let ratio = TypedValue::from_slice("aspect", TYPE_RATIONAL, &[1i32, 4]).unwrap();
    assert_eq!(ratio.get_float(-1.0), 0.25);
    let half = TypedValue::from_scalar("h", Half::from_f32(0.5));
    assert_eq!(half.get_float(-1.0), 0.5);
    assert_eq!(half.get_string(0), "0.5");
}

#[test]
fn test_get_on_wrong_type_is_none() {
    let value = TypedValue::from_scalar("x", 1i32);
    assert_eq!(value.get::<f32>(0), None);
    assert_eq!(value.get::<i32>(1), None);
    assert_eq!(value.values::<f32>().count(), 0);
}

#[test]
fn test_get_string_formats() {
    let ints = TypedValue::from_slice("i", TYPE_INT.array(3), &[1, 2, 3]).unwrap();
    assert_eq!(ints.get_string(0), "1, 2, 3");

    let color = TypedValue::from_slice("c", TYPE_COLOR, &[1.0f32, 0.5, 0.25]).unwrap();
    assert_eq!(color.get_string(0), "1, 0.5, 0.25");

    let ratio = TypedValue::from_slice("r", TYPE_RATIONAL, &[30000i32, 1001]).unwrap();
    assert_eq!(ratio.get_string(0), "30000/1001");

    let names = [UString::new("a"), UString::new("b")];
    let strings = TypedValue::from_slice("s", TYPE_STRING.array(2), &names).unwrap();
    assert_eq!(strings.get_string(0), r#""a", "b""#);

    let repeated = TypedValue::from_slice("f", TYPE_FLOAT, &[1.0f32, 2.0]).unwrap();
    assert_eq!(repeated.nvalues(), 2);
    assert_eq!(repeated.get_string(0), "1, 2");
}

#[test]
fn test_get_string_truncates_with_summary() {
    let value =
        TypedValue::from_slice("f", TYPE_FLOAT.array(5), &[1.0f32, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(value.get_string(2), "1, 2, ... [5 x float]");
    assert_eq!(value.get_string(5), "1, 2, 3, 4, 5");
}

#[test]
fn test_get_string_indexed() {
    let value = TypedValue::from_slice("f", TYPE_FLOAT.array(3), &[1.0f32, 2.0, 3.0]).unwrap();
    assert_eq!(value.get_string_indexed(1), "2");
    assert_eq!(value.get_string_indexed(3), "");

    let names = [UString::new("left"), UString::new("right")];
    let strings = TypedValue::from_slice("s", TYPE_STRING.array(2), &names).unwrap();
    assert_eq!(strings.get_string_indexed(1), "right");
    assert_eq!(strings.get_ustring_indexed(0), names[0]);
    assert_eq!(strings.get_ustring_indexed(2), UString::EMPTY);
}

#[test]
fn test_unknown_type_renders_placeholder() {
    init_test_logging();
    let value = TypedValue::zeroed("mystery", TYPE_UNKNOWN, 1).unwrap();
    let expected = "<unknown data type> (base 0, agg 1 vec 0)";
    assert_eq!(value.get_string(0), expected);
    assert_eq!(value.get_string_indexed(0), expected);
}

#[test]
fn test_clear_is_idempotent() {
    let mut value = TypedValue::from_slice("f", TYPE_FLOAT.array(8), &[1.0f32; 8]).unwrap();
    assert!(value.owns_heap());
    value.clear();
    assert_eq!(value.storage(), PayloadKind::Empty);
    value.clear();
    assert_eq!(value.storage(), PayloadKind::Empty);
    assert_eq!(value.name(), "f");
    assert!(value.data().is_empty());
    assert_eq!(value.get_string(0), "");
    assert_eq!(value.get_float(7.0), 7.0);
}

#[test]
fn test_clone_is_deep() {
    let value = TypedValue::from_slice("f", TYPE_FLOAT.array(8), &[2.0f32; 8]).unwrap();
    let copy = value.clone();
    assert_eq!(copy, value);
    assert!(copy.owns_heap());
    assert_ne!(copy.data().as_ptr(), value.data().as_ptr());
}

#[test]
fn test_clone_from_replaces_value() {
    let source = TypedValue::string("label", "beauty");
    let mut target = TypedValue::from_slice("f", TYPE_FLOAT.array(8), &[2.0f32; 8]).unwrap();
    target.clone_from(&source);
    assert_eq!(target, source);
    assert!(target.is_inline());

    let snapshot = target.clone();
    target.clone_from(&snapshot);
    assert_eq!(target, source);
}

#[test]
fn test_take_leaves_inert_donor() {
    let mut donor = TypedValue::from_slice("f", TYPE_FLOAT.array(8), &[3.0f32; 8]).unwrap();
    let ptr = donor.data().as_ptr();
    let taken = donor.take();
    assert_eq!(taken.data().as_ptr(), ptr);
    assert!(taken.owns_heap());
    assert_eq!(donor.storage(), PayloadKind::Empty);
    assert!(!donor.owns_heap());
    assert_eq!(donor.name(), "f");
}

#[test]
fn test_move_from_transfers_ownership() {
    let mut source = TypedValue::from_slice("f", TYPE_FLOAT.array(8), &[4.0f32; 8]).unwrap();
    let expected = source.clone();
    let mut target = TypedValue::from_scalar("n", 1i32);
    target.move_from(&mut source);
    assert_eq!(target, expected);
    assert_eq!(source.storage(), PayloadKind::Empty);
}

#[test]
fn test_interp_is_kept() {
    let value = TypedValue::from_scalar("P", 0.0f32).with_interp(Interp::Vertex);
    assert_eq!(value.interp(), Interp::Vertex);
    assert_eq!(value.clone().interp(), Interp::Vertex);
    assert_eq!(Interp::PerPiece.to_string(), "perpiece");
}

#[test]
fn test_equality_compares_contents() {
    assert_eq!(
        TypedValue::from_scalar("x", 1i32),
        TypedValue::parse("x", TYPE_INT, "1")
    );
    assert_ne!(
        TypedValue::from_scalar("x", 1i32),
        TypedValue::from_scalar("y", 1i32)
    );
    assert_ne!(
        TypedValue::from_scalar("x", 1i32),
        TypedValue::from_scalar("x", 1u32)
    );
}

#[test]
fn test_debug_shows_rendered_value() {
    let value = TypedValue::from_scalar("fov", 45.0f32);
    let debug = format!("{:?}", value);
    assert!(debug.contains("TypedValue"));
    assert!(debug.contains("\"fov\""));
    assert!(debug.contains("45"));
}
