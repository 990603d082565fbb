use collatekey_core::{entry::IndexEntry, prelude::*, range::KeyRange};
use proptest::prelude::*;
use std::cmp::Ordering;

fn num(text: &str) -> Value {
    Value::Number(text.parse().expect("test literal should parse"))
}

fn key(codec: &Codec, value: &Value) -> EncodedKey {
    codec.encode(value).expect("value should encode")
}

#[test]
fn type_categories_sort_in_fixed_order() {
    let codec = Codec::default();
    let ascending = [
        Value::Null,
        Value::Bool(false),
        Value::Bool(true),
        Value::from(0),
        Value::from(""),
        Value::Array(vec![]),
    ];

    for pair in ascending.windows(2) {
        assert_eq!(
            compare(&key(&codec, &pair[0]), &key(&codec, &pair[1])),
            Ordering::Less,
            "{pair:?}"
        );
    }
}

#[test]
fn numbers_sort_across_sign_and_fraction() {
    let codec = Codec::default();

    assert!(key(&codec, &num("-5")) < key(&codec, &num("0")));
    assert!(key(&codec, &num("0")) < key(&codec, &num("3.5")));
}

#[test]
fn descending_second_field_reverses_only_that_field() {
    let collation = IndexCollation::new(CodecConfig::default(), DescVector::new(vec![false, true]));
    let codec = collation.codec();
    let index_key = |first: i32, second: &str| {
        collation
            .encode_key(&codec, &[Value::from(first), Value::from(second)])
            .expect("key should encode")
    };

    assert!(index_key(10, "b") < index_key(10, "a"));
    assert!(index_key(9, "a") < index_key(10, "b"));
    assert!(index_key(10, "a") < index_key(11, "b"));

    assert_eq!(
        collation.decode_key(&codec, &index_key(10, "b")),
        Ok(vec![Value::from(10), Value::from("b")])
    );
}

#[test]
fn literal_terminator_bytes_round_trip() {
    let codec = Codec::default();
    let value = Value::String(vec![b'a', 0x00, 0x00, b'b', 0x00]);

    assert_eq!(codec.decode(&key(&codec, &value)), Ok(value));
}

#[test]
fn extracted_field_equals_standalone_encoding() {
    let codec = Codec::default();
    let fields = [
        Value::from("first"),
        Value::object([("x", Value::from(1))]).expect("object should build"),
        Value::Array(vec![Value::Null]),
    ];
    let composite = codec.encode_composite(&fields).expect("key should encode");

    let (second, _) = codec.extract_field(&composite, 2).expect("field 2 exists");
    assert_eq!(second, key(&codec, &fields[1]).as_bytes());
    assert_eq!(codec.decode(second), Ok(fields[1].clone()));
}

#[test]
fn prefix_scan_over_sorted_entries() {
    let collation = IndexCollation::new(CodecConfig::default(), DescVector::new(vec![false, true]));
    let codec = collation.codec();

    let rows = [
        ("ada", 36, "d1"),
        ("bob", 20, "d2"),
        ("ada", 41, "d3"),
        ("cy", 36, "d4"),
        ("ada", 36, "d5"),
    ];
    let mut entries: Vec<IndexEntry> = rows
        .iter()
        .map(|(name, age, docid)| {
            let key = collation
                .encode_key(&codec, &[Value::from(*name), Value::from(*age)])
                .expect("key should encode");
            IndexEntry::new(&key, docid.as_bytes()).expect("entry should frame")
        })
        .collect();
    entries.sort_by(|left, right| compare(left.as_bytes(), right.as_bytes()));

    let prefix = codec
        .encode_composite(&[Value::from("ada")])
        .expect("prefix should encode");
    let range = KeyRange::prefix(&prefix);

    let hits: Vec<&[u8]> = entries
        .iter()
        .filter(|entry| range.contains(entry.as_bytes()))
        .map(IndexEntry::docid)
        .collect();

    // Age descending, then docid ascending.
    assert_eq!(hits, vec![b"d3".as_slice(), b"d1".as_slice(), b"d5".as_slice()]);
}

#[test]
fn index_collation_persists_as_json() {
    let collation = IndexCollation::new(CodecConfig::LENGTH_PREFIXED, DescVector::new(vec![true]));
    let text = serde_json::to_string(&collation).expect("collation should serialize");
    let back: IndexCollation = serde_json::from_str(&text).expect("collation should parse");

    assert_eq!(back, collation);
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (any::<i64>(), -12i32..12).prop_map(|(m, e)| Value::Number(Number::new(m, e))),
        "[a-c\u{0}]{0,4}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn sorted_keys_decode_to_sorted_values(values in proptest::collection::vec(arb_scalar(), 1..16)) {
        let codec = Codec::default();
        let mut keys: Vec<EncodedKey> = values.iter().map(|value| key(&codec, value)).collect();
        keys.sort();

        let decoded: Vec<Value> = keys
            .iter()
            .map(|key| codec.decode(key).expect("key should decode"))
            .collect();
        let mut expected = values;
        expected.sort();

        prop_assert_eq!(decoded, expected);
    }
}
