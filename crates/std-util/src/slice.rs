#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let actual = &$e;
        if !actual.is_empty() {
            panic!("expected empty; actual={:?}", actual);
        }
    }};
}

/// Asserts a collection's length, printing the collection on failure.
#[macro_export]
macro_rules! assert_len {
    ($e:expr, $len:expr) => {{
        let actual = &$e;
        if actual.len() != $len {
            panic!("expected len {}; actual len {}: {:?}", $len, actual.len(), actual);
        }
    }};
}
