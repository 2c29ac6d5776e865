use serde::Serialize;
use std::fmt;

/// How a recipe uses the raw `input` path of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputPolicy {
    /// The recipe reads the raw file itself and needs `input`.
    Required,
    /// The recipe can use `input`, but still works on a document.
    Supported,
    #[default]
    Ignored,
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputPolicy::Required => "REQUIRED",
            InputPolicy::Supported => "SUPPORTED",
            InputPolicy::Ignored => "IGNORED",
        };
        f.write_str(s)
    }
}

/// How the caller's positional arguments reach a recipe constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallingConvention {
    /// Each argument binds to its own constructor parameter.
    Variadic,
    /// The whole argument list binds to a single list parameter.
    ListArguments,
}

impl CallingConvention {
    /// Legacy rule for recipes that do not declare a convention: a documented
    /// constructor takes spread arguments, an undocumented one takes a list.
    pub fn inferred(constructor_documented: bool) -> Self {
        if constructor_documented {
            CallingConvention::Variadic
        } else {
            CallingConvention::ListArguments
        }
    }
}

impl fmt::Display for CallingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallingConvention::Variadic => f.write_str("variadic"),
            CallingConvention::ListArguments => f.write_str("list_arguments"),
        }
    }
}
