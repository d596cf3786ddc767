use crate::ErrorKind;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Debug)]
enum TestEnum {
    Unit,
    Newtype(i32),
    Tuple(i32, bool),
    Struct { a: i32, b: bool },
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Wrapper {
    value: TestEnum,
}

#[derive(Serialize)]
struct NewtypeEquivalent {
    value: NewtypeEquivalentInner,
}

#[derive(Serialize)]
struct NewtypeEquivalentInner {
    #[serde(rename = "Newtype")]
    newtype: i32,
}

#[derive(Serialize)]
struct TupleEquivalent {
    value: TupleEquivalentInner,
}

#[derive(Serialize)]
struct TupleEquivalentInner {
    #[serde(rename = "Tuple")]
    tuple: (i32, bool),
}

#[derive(Serialize)]
struct StructEquivalent {
    value: StructEquivalentInner,
}

#[derive(Serialize)]
struct StructEquivalentInner {
    #[serde(rename = "Struct")]
    struct_: StructEquivalentFields,
}

#[derive(Serialize)]
struct StructEquivalentFields {
    a: i32,
    b: bool,
}

#[derive(Serialize)]
struct UnitEquivalent {
    value: &'static str,
}

#[test]
fn unit_variant() {
    let expected = Wrapper {
        value: TestEnum::Unit,
    };

    let expected_bytes = crate::to_vec(&UnitEquivalent { value: "Unit" }).unwrap();
    let actual_bytes = crate::to_vec(&expected).unwrap();
    assert_eq!(expected_bytes, actual_bytes);

    let actual = crate::from_slice::<Wrapper>(&expected_bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn newtype_variant() {
    let expected = Wrapper {
        value: TestEnum::Newtype(42),
    };

    let expected_bytes = crate::to_vec(&NewtypeEquivalent {
        value: NewtypeEquivalentInner { newtype: 42 },
    })
    .unwrap();
    let actual_bytes = crate::to_vec(&expected).unwrap();
    assert_eq!(expected_bytes, actual_bytes);

    let actual = crate::from_slice::<Wrapper>(&expected_bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn tuple_variant() {
    let expected = Wrapper {
        value: TestEnum::Tuple(42, true),
    };

    let expected_bytes = crate::to_vec(&TupleEquivalent {
        value: TupleEquivalentInner { tuple: (42, true) },
    })
    .unwrap();
    let actual_bytes = crate::to_vec(&expected).unwrap();
    assert_eq!(expected_bytes, actual_bytes);

    let actual = crate::from_slice::<Wrapper>(&expected_bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn struct_variant() {
    let expected = Wrapper {
        value: TestEnum::Struct { a: 42, b: true },
    };

    let expected_bytes = crate::to_vec(&StructEquivalent {
        value: StructEquivalentInner {
            struct_: StructEquivalentFields { a: 42, b: true },
        },
    })
    .unwrap();
    let actual_bytes = crate::to_vec(&expected).unwrap();
    assert_eq!(expected_bytes, actual_bytes);

    let actual = crate::from_slice::<Wrapper>(&expected_bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn top_level_variants() {
    let bytes = crate::to_vec(&TestEnum::Struct { a: 1, b: false }).unwrap();
    assert_eq!(bytes, b"Struct {\r\n    a 1\r\n    b f\r\n}\r\n");
    assert_eq!(
        crate::from_slice::<TestEnum>(&bytes).unwrap(),
        TestEnum::Struct { a: 1, b: false }
    );

    let bytes = crate::to_vec(&TestEnum::Newtype(7)).unwrap();
    assert_eq!(bytes, b"Newtype 7\r\n");
    assert_eq!(
        crate::from_slice::<TestEnum>(&bytes).unwrap(),
        TestEnum::Newtype(7)
    );

    let bytes = crate::to_vec(&TestEnum::Tuple(7, true)).unwrap();
    assert_eq!(
        crate::from_slice::<TestEnum>(&bytes).unwrap(),
        TestEnum::Tuple(7, true)
    );

    // a bare unit variant has nothing to be named by
    let err = crate::to_vec(&TestEnum::Unit).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoNameProvided);

    let err = crate::from_slice::<TestEnum>(b"Newtype 1 Newtype 2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Custom);
}

#[test]
fn variants_in_arrays() {
    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct List {
        values: Vec<TestEnum>,
    }

    let expected = List {
        values: vec![
            TestEnum::Unit,
            TestEnum::Newtype(1),
            TestEnum::Tuple(2, false),
            TestEnum::Struct { a: 3, b: true },
        ],
    };

    let bytes = crate::to_vec(&expected).unwrap();
    let actual = crate::from_slice::<List>(&bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn unknown_variant() {
    let err = crate::from_slice::<Wrapper>(b"value \"Missing\"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Custom);

    let err = crate::from_slice::<Wrapper>(b"value { Newtype 1 Unit \"\" }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Custom);
}
