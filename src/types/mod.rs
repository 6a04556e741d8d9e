/// Declares a family enum whose variants map one-to-one onto the family
/// names used in the dataset, with `Unknown` as the fallback.
macro_rules! family_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $($variant,)*
            #[default]
            Unknown,
        }

        impl $name {
            /// Resolve a dataset family name, ignoring ASCII case and
            /// surrounding whitespace.
            pub fn evaluate(name: &str) -> Self {
                let name = name.trim();
                $(
                    if name.eq_ignore_ascii_case($label) {
                        return Self::$variant;
                    }
                )*
                Self::Unknown
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                    Self::Unknown => "unknown",
                }
            }
        }
    };
}

mod category;
mod operating_system_family;
mod user_agent;
mod user_agent_family;
mod user_agent_type;

pub use category::*;
pub use operating_system_family::*;
pub use user_agent::*;
pub use user_agent_family::*;
pub use user_agent_type::*;
