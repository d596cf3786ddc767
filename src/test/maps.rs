use crate::ErrorKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::iter::FromIterator;

fn run_test<T>(key: T)
where
    T: Display + Serialize + DeserializeOwned + PartialEq + Eq + Debug + Hash,
{
    let expected_bytes =
        crate::to_vec(&HashMap::<_, _>::from_iter([(key.to_string(), "a")])).unwrap();

    let expected = HashMap::<_, _>::from_iter([(key, "a".to_string())]);
    let actual_bytes = crate::to_vec(&expected).unwrap();
    assert_eq!(expected_bytes, actual_bytes);

    let actual = crate::from_slice::<HashMap<_, _>>(&expected_bytes).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn string_keys() {
    run_test("hello".to_string());
}

#[test]
fn char_keys() {
    run_test('x');
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
enum TestEnum {
    Variant,
}

impl Display for TestEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestEnum::Variant => f.write_str("Variant"),
        }
    }
}

#[test]
fn enum_keys() {
    run_test(TestEnum::Variant);
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
struct TestNewtype(String);

impl Display for TestNewtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn newtype_keys() {
    run_test(TestNewtype("hello".to_string()))
}

#[test]
fn non_string_keys() {
    let map = BTreeMap::<_, _>::from_iter([(1, "a")]);
    let err = crate::to_vec(&map).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyMustBeAString);

    let map = BTreeMap::<_, _>::from_iter([(true, "a")]);
    let err = crate::to_vec(&map).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyMustBeAString);
}

#[test]
fn keys_must_be_identifiers() {
    for key in &["", "1abc", "a b", "t", "a-b", "x\"y"] {
        let map = BTreeMap::<_, _>::from_iter([(*key, 1)]);
        let err = crate::to_vec(&map).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName, "{:?}", key);
    }
}

#[test]
fn top_level_maps_are_flattened() {
    let map = BTreeMap::<_, _>::from_iter([("a", 1), ("b", 2)]);
    let bytes = crate::to_vec(&map).unwrap();
    assert_eq!(bytes, b"a 1\r\nb 2\r\n");

    let actual = crate::from_slice::<BTreeMap<String, i32>>(&bytes).unwrap();
    assert_eq!(
        actual,
        BTreeMap::from_iter([("a".to_string(), 1), ("b".to_string(), 2)])
    );
}

#[test]
fn nested_maps() {
    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Test {
        map: BTreeMap<String, Vec<i32>>,
    }

    let value = Test {
        map: BTreeMap::from_iter([("x".to_string(), vec![1, 2]), ("y".to_string(), vec![])]),
    };

    let bytes = crate::to_vec(&value).unwrap();
    assert_eq!(
        bytes,
        &b"map {\r\n    x [\r\n        1,\r\n        2\r\n    ]\r\n    y [\r\n    ]\r\n}\r\n"[..]
    );

    let actual = crate::from_slice::<Test>(&bytes).unwrap();
    assert_eq!(value, actual);
}
