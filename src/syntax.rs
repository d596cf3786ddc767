//! Character classes shared by the reader and the writer.
use crate::Error;

pub(crate) const INDENT: &[u8] = b"    ";
pub(crate) const NEWLINE: &[u8] = b"\r\n";

pub(crate) fn is_skip(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r')
}

pub(crate) fn is_reserved(b: u8) -> bool {
    matches!(b, b',' | b'[' | b']' | b'{' | b'}' | b'"' | b'@')
}

/// Checks that `name` reads back as an identifier token.
pub(crate) fn check_identifier(name: &str) -> Result<(), Error> {
    let bytes = name.as_bytes();

    let first = match bytes.first() {
        Some(&b) => b,
        None => return Err(Error::invalid_name("names can't be empty")),
    };
    if first.is_ascii_digit() {
        return Err(Error::invalid_name("names can't start with a digit"));
    }
    if name == "t" || name == "f" {
        return Err(Error::invalid_name("names can't be a boolean literal"));
    }

    for &b in bytes {
        if is_skip(b) || is_reserved(b) {
            return Err(Error::invalid_name(
                "names can't contain whitespace or reserved symbols",
            ));
        }
        if b == b'.' || b == b'-' || b == 0 {
            return Err(Error::invalid_name("names can't contain '.', '-' or NUL"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn valid_identifiers() {
        for name in &["a", "value", "b", "binary_thing", "x1", "héllo", "tt", "_"] {
            check_identifier(name).unwrap();
        }
    }

    #[test]
    fn invalid_identifiers() {
        for name in &["", "1a", "t", "f", "a b", "a,b", "a.b", "a-b", "a\"", "a@", "\0", "{"] {
            let err = check_identifier(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName, "{:?}", name);
        }
    }
}
