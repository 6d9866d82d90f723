//! Macros for reducing boilerplate when defining records

/// Implement [`Record`](crate::core::entity::Record) for a struct with an `id: i64` field
///
/// Fields listed under `unique:` become single-field unique keys.
///
/// # Example
/// ```rust,ignore
/// impl_record!(User, "user", unique: [username, email]);
/// impl_record!(Title, "title");
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ident, $kind:expr) => {
        $crate::impl_record!($type, $kind, unique: []);
    };

    ($type:ident, $kind:expr, unique: [$($field:ident),* $(,)?]) => {
        impl $crate::core::entity::Record for $type {
            const KIND: &'static str = $kind;

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn unique_keys(&self) -> Vec<$crate::core::entity::UniqueKey> {
                vec![
                    $($crate::core::entity::UniqueKey::new(
                        stringify!($field),
                        self.$field.to_string(),
                    )),*
                ]
            }
        }
    };
}
