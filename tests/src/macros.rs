/// Builds a [`Schema`](stubdb::Schema) over `db` with the given models
/// registered in order.
#[macro_export]
macro_rules! models {
    (
        $db:expr,
        $( $name:expr => $def:expr ),* $(,)?
    ) => {{
        let mut builder = stubdb::Schema::builder();
        builder.db($db);
        $( builder.register($name, $def); )*
        match builder.build() {
            Ok(schema) => schema,
            Err(err) => panic!("failed to build schema: {err}"),
        }
    }};
}

/// Declares `#[test]` wrappers for scenario functions, initializing
/// logging before each one.
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+ $(,)?
    ) => {
        mod scenarios {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    $crate::init_logging();
                    super::$f();
                }
            )*
        }
    };
}
