/// Builds a [`Record`](crate::Record) from `key => value` pairs.
///
/// ```
/// use stubdb_core::{record, Value};
///
/// let record = record! { "id" => 1, "name" => "Link" };
/// assert_eq!(record.get("name"), Some(&Value::from("Link")));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    (
        $( $key:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut record = $crate::Record::new();
        $( record.insert($key, $crate::Value::from($value)); )+
        record
    }};
}

/// Builds an equality [`Query`](crate::Query) from `key => value` pairs.
#[macro_export]
macro_rules! query {
    (
        $( $key:expr => $value:expr ),* $(,)?
    ) => {{
        let query = $crate::Query::new();
        $( let query = query.eq($key, $value); )*
        query
    }};
}
