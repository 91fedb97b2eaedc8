//! Open string enumerations.
//!
//! The backend and the fixture data describe statuses, severities and
//! issue types as free strings. [`open_enum!`] declares an enum with one
//! variant per known wire value plus an `Other(String)` catch-all, so a
//! value introduced by the backend later parses instead of failing and
//! round-trips verbatim.

/// Declare an open string enumeration.
///
/// ```
/// auditguardian_core::open_enum! {
///     /// Traffic light.
///     pub enum Light {
///         Red => "red",
///         Green => "green",
///     }
/// }
///
/// assert_eq!(Light::from("red"), Light::Red);
/// assert_eq!(Light::from("blue"), Light::Other("blue".to_string()));
/// assert_eq!(Light::Other("blue".into()).as_str(), "blue");
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this client does not recognise, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Every wire value this client recognises.
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            /// The wire representation of this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            /// `false` for values that fell through to `Other`.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                let known = match raw.as_str() {
                    $( $wire => Some(Self::$variant), )+
                    _ => None,
                };
                match known {
                    Some(value) => value,
                    None => Self::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::open_enum! {
        pub enum Sample {
            Alpha => "alpha",
            BetaGamma => "beta-gamma",
        }
    }

    #[test]
    fn known_values_parse_to_variants() {
        assert_eq!(Sample::from("alpha"), Sample::Alpha);
        assert_eq!(Sample::from("beta-gamma"), Sample::BetaGamma);
        assert!(Sample::Alpha.is_known());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Sample::from("ALPHA"), Sample::Other("ALPHA".to_string()));
    }

    #[test]
    fn unknown_value_is_kept_verbatim() {
        let value = Sample::from("delta");
        assert!(!value.is_known());
        assert_eq!(value.as_str(), "delta");
        assert_eq!(String::from(value), "delta");
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&Sample::BetaGamma).unwrap();
        assert_eq!(json, "\"beta-gamma\"");

        let parsed: Sample = serde_json::from_str("\"epsilon\"").unwrap();
        assert_eq!(parsed, Sample::Other("epsilon".to_string()));
    }

    #[test]
    fn known_list_matches_declaration_order() {
        assert_eq!(Sample::KNOWN, &["alpha", "beta-gamma"]);
    }
}
