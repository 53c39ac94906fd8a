//! The `catalog_view!` macro.
//!
//! One invocation describes a view's columns once and generates:
//!
//! - the record struct (`Option<T>` fields for nullable columns)
//! - `Record::SQL`, `Record::COLUMNS` and `Record::VIEW`
//! - an ordinal enum whose discriminants are the column positions in `SQL`
//! - the [`CatalogRecord`](crate::reader::CatalogRecord) impl
//! - a `FooReader<C>` alias with one accessor per column
//!
//! ```ignore
//! catalog_view! {
//!     /// Row of `sys.schemas`.
//!     record Schema;
//!     reader SchemasReader;
//!     ordinals SchemaOrdinal;
//!     view "sys"."schemas" as "s";
//!     columns {
//!         name: String,
//!         schema_id: i32,
//!         principal_id: Option<i32>,
//!     }
//! }
//! ```
//!
//! A column whose name is a Rust keyword takes the SQL name as an override:
//! `type_code: String = "type"`.

/// Column name in SQL: the override literal if given, else the field name.
macro_rules! column_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}

macro_rules! catalog_view {
    (
        $(#[$meta:meta])*
        record $record:ident;
        reader $reader:ident;
        ordinals $ordinals:ident;
        view $schema:literal . $view:literal as $alias:literal;
        columns {
            $(#[$first_meta:meta])*
            $first:ident : $first_ty:ty $(= $first_name:literal)?
            $(
                ,
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty $(= $name:literal)?
            )*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        pub struct $record {
            $(#[$first_meta])*
            pub $first: $first_ty,
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $record {
            /// Literal query text; column order matches the ordinal enum.
            pub const SQL: &'static str = concat!(
                "SELECT ", $alias, ".[", $crate::catalog::macros::column_name!($first $(, $first_name)?), "]",
                $(
                    "\n      ,", $alias, ".[", $crate::catalog::macros::column_name!($field $(, $name)?), "]",
                )*
                "\nFROM [", $schema, "].[", $view, "] ", $alias
            );

            pub const COLUMNS: &'static [$crate::core::ColumnDef] = &[
                $crate::core::ColumnDef {
                    name: $crate::catalog::macros::column_name!($first $(, $first_name)?),
                    sql_type: <$first_ty as $crate::reader::ColumnValue>::SQL_TYPE,
                    nullable: <$first_ty as $crate::reader::ColumnValue>::NULLABLE,
                },
                $(
                    $crate::core::ColumnDef {
                        name: $crate::catalog::macros::column_name!($field $(, $name)?),
                        sql_type: <$ty as $crate::reader::ColumnValue>::SQL_TYPE,
                        nullable: <$ty as $crate::reader::ColumnValue>::NULLABLE,
                    },
                )*
            ];

            pub const VIEW: $crate::core::ViewDescriptor = $crate::core::ViewDescriptor {
                schema: $schema,
                name: $view,
                alias: $alias,
                sql: $record::SQL,
                columns: $record::COLUMNS,
            };
        }

        #[doc = concat!("Column ordinals of `", $schema, ".", $view, "`.")]
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum $ordinals {
            $first,
            $($field,)*
        }

        impl $ordinals {
            /// Every column, in ordinal order.
            pub const ALL: &'static [$ordinals] = &[$ordinals::$first, $($ordinals::$field,)*];

            pub const fn ordinal(self) -> usize {
                self as usize
            }

            pub fn column_name(self) -> &'static str {
                $record::COLUMNS[self as usize].name
            }
        }

        impl $crate::reader::CatalogRecord for $record {
            fn view() -> &'static $crate::core::ViewDescriptor {
                static VIEW: $crate::core::ViewDescriptor = $record::VIEW;
                &VIEW
            }

            fn from_reader<C: $crate::cursor::RowCursor>(
                reader: &$crate::reader::DataReader<C>,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $first: <$first_ty as $crate::reader::ColumnValue>::read_column(
                        reader,
                        $ordinals::$first as usize,
                    )?,
                    $(
                        $field: <$ty as $crate::reader::ColumnValue>::read_column(
                            reader,
                            $ordinals::$field as usize,
                        )?,
                    )*
                })
            }
        }

        #[doc = concat!("Typed reader over the result of [`", stringify!($record), "::SQL`].")]
        pub type $reader<C> = $crate::reader::ViewReader<$record, C>;

        impl<C: $crate::cursor::RowCursor> $crate::reader::ViewReader<$record, C> {
            pub fn $first(&self) -> $crate::error::Result<$first_ty> {
                <$first_ty as $crate::reader::ColumnValue>::read_column(
                    self.data_reader(),
                    $ordinals::$first as usize,
                )
            }

            $(
                pub fn $field(&self) -> $crate::error::Result<$ty> {
                    <$ty as $crate::reader::ColumnValue>::read_column(
                        self.data_reader(),
                        $ordinals::$field as usize,
                    )
                }
            )*
        }
    };
}

/// `object_type()` for records that carry a `type` object code.
macro_rules! object_type_accessor {
    ($($record:ident),* $(,)?) => {
        $(
            impl $record {
                /// Decoded `type` column. `None` for codes this crate does not know.
                pub fn object_type(&self) -> Option<$crate::catalog::ObjectType> {
                    $crate::catalog::ObjectType::from_code(&self.type_code)
                }
            }
        )*
    };
}

pub(crate) use catalog_view;
pub(crate) use column_name;
pub(crate) use object_type_accessor;
