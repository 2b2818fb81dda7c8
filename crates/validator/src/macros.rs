//! Macros for declaring the closed set of filter kinds.
//!
//! # Available Macros
//!
//! - [`filter_set!`]: the `FilterType` sum type, its declarative twin
//!   `FilterConfig`, and the `From` conversions tying them to `Filter`
//!
//! Every kind is listed exactly once; adding a kind is one line:
//!
//! ```rust,ignore
//! crate::filter_set! {
//!     /// Boolean tokens.
//!     Bool(BoolFilter, BoolOptions) => "bool",
//!     /// Integers and integer strings.
//!     Int(IntFilter, IntOptions) => "int",
//! }
//! ```

// ============================================================================
// FILTER SET MACRO
// ============================================================================

/// Declares the filter sum type and its config form.
///
/// Each entry `Variant(FilterStruct, OptionsStruct) => "tag"` requires:
///
/// - `FilterStruct: Coerce + Configurable<Options = OptionsStruct> + Clone + Debug`
/// - `FilterStruct::from_options(OptionsStruct) -> Result<Self, FilterError>`
/// - `OptionsStruct: Clone + PartialEq + Serialize + Deserialize`
///
/// Generated items, in the invoking module:
///
/// - `enum FilterType`: one variant per kind, with `name`, `options_map`,
///   `get_option`, `set_option`, `to_config` and a delegating `Coerce`
///   impl;
/// - `enum FilterConfig`: serde form internally tagged by `type`, with
///   `name` and `build`;
/// - `From<FilterStruct>` for both `FilterType` and `Filter`.
#[doc(hidden)]
#[macro_export]
macro_rules! filter_set {
    (
        $(
            $(#[$vmeta:meta])*
            $variant:ident($filter:ty, $options:ty) => $tag:literal
        ),+ $(,)?
    ) => {
        /// One filter of a fixed kind.
        ///
        /// The set of kinds is closed; dispatch is a plain `match`.
        #[derive(Debug, Clone)]
        #[non_exhaustive]
        pub enum FilterType {
            $(
                $(#[$vmeta])*
                $variant($filter),
            )+
        }

        impl FilterType {
            /// Stable lowercase name of the kind, as used in config.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $tag, )+
                }
            }

            /// Options as an ordered name → value map.
            #[must_use]
            pub fn options_map(
                &self,
            ) -> ::serde_json::Map<::std::string::String, ::serde_json::Value> {
                match self {
                    $(
                        Self::$variant(f) => $crate::foundation::Configurable::options_map(f),
                    )+
                }
            }

            /// Reads one option by name.
            #[must_use]
            pub fn get_option(&self, name: &str) -> ::std::option::Option<::serde_json::Value> {
                match self {
                    $(
                        Self::$variant(f) => {
                            $crate::foundation::Configurable::get_option(f, name)
                        }
                    )+
                }
            }

            /// Sets one option by name; unknown names are ignored.
            pub fn set_option(
                &mut self,
                name: &str,
                value: ::serde_json::Value,
            ) -> ::std::result::Result<(), $crate::foundation::FilterError> {
                match self {
                    $(
                        Self::$variant(f) => {
                            $crate::foundation::Configurable::set_option(f, name, value)
                        }
                    )+
                }
            }

            /// Declarative form of this filter.
            #[must_use]
            pub fn to_config(&self) -> FilterConfig {
                match self {
                    $(
                        Self::$variant(f) => {
                            let options = $crate::foundation::Configurable::options(f);
                            FilterConfig::$variant(::std::clone::Clone::clone(options))
                        }
                    )+
                }
            }
        }

        impl $crate::foundation::Coerce for FilterType {
            fn coerce(
                &self,
                input: &::serde_json::Value,
            ) -> ::std::result::Result<::serde_json::Value, $crate::foundation::Messages> {
                match self {
                    $( Self::$variant(f) => $crate::foundation::Coerce::coerce(f, input), )+
                }
            }

            fn sentinel(&self) -> ::serde_json::Value {
                match self {
                    $( Self::$variant(f) => $crate::foundation::Coerce::sentinel(f), )+
                }
            }
        }

        $(
            impl ::std::convert::From<$filter> for FilterType {
                fn from(filter: $filter) -> Self {
                    Self::$variant(filter)
                }
            }

            impl ::std::convert::From<$filter> for $crate::filter::Filter {
                fn from(filter: $filter) -> Self {
                    Self::new(FilterType::$variant(filter))
                }
            }
        )+

        /// Declarative description of a filter.
        ///
        /// Serialized as a flat object tagged by `type`, with the kind's
        /// options alongside:
        ///
        /// ```json
        /// { "type": "string", "min_length": 3, "max_length": 20 }
        /// ```
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(tag = "type")]
        #[non_exhaustive]
        pub enum FilterConfig {
            $(
                $(#[$vmeta])*
                #[serde(rename = $tag)]
                $variant($options),
            )+
        }

        impl FilterConfig {
            /// Stable lowercase name of the kind.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $tag, )+
                }
            }

            /// Builds the filter, validating its options.
            pub fn build(
                &self,
            ) -> ::std::result::Result<FilterType, $crate::foundation::FilterError> {
                match self {
                    $(
                        Self::$variant(options) => ::std::result::Result::Ok(FilterType::$variant(
                            <$filter>::from_options(::std::clone::Clone::clone(options))?,
                        )),
                    )+
                }
            }
        }
    };
}
