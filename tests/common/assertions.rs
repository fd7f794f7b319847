//! Domain-specific assertion macros for plog harnesses.
//!
//! Failure messages name the record column that diverged and dump the whole
//! record, so a broken reduction policy is obvious at a glance.

/// Assert that a `Record` column holds an expected value.
///
/// ```rust
/// assert_column!(record, Field::ParentHash, "0xabc");
/// ```
#[macro_export]
macro_rules! assert_column {
    ($record:expr, $field:expr, $value:expr) => {{
        let record: &plog_core::Record = &$record;
        let field: plog_core::Field = $field;
        let expected: &str = $value;
        let actual = record.get(field);
        if actual != expected {
            panic!(
                "assert_column! failed:\n  record.{}\n  expected: {:?}\n  actual:   {:?}\n  record:   {:#?}",
                field, expected, actual, record
            );
        }
    }};
}

/// Assert that a record carries nothing but defaults (slot aside).
#[macro_export]
macro_rules! assert_default_record {
    ($record:expr) => {{
        let record: &plog_core::Record = &$record;
        if !record.is_default() {
            panic!(
                "assert_default_record! failed: record has observed values:\n{:#?}",
                record
            );
        }
    }};
}
