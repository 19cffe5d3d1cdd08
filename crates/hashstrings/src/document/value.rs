/// A parsed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `true` / `false`
    Bool(bool),
    /// Decimal or hexadecimal integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// String bytes, with adjacent literals already concatenated
    String(Vec<u8>),
    /// `[ ... ]`, scalars only
    Array(Vec<Item>),
    /// `( ... )`, any values
    List(Vec<Item>),
    /// `{ ... }`, named settings
    Group(Vec<Setting>),
}

impl Value {
    /// Whether this is a bool, number or string.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Short name of the value's type, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::List(_) => "list",
            Self::Group(_) => "group",
        }
    }
}

/// An unnamed element of an array or list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The element
    pub value: Value,
    /// 1-based line where the element starts
    pub line: usize,
}

/// A named value.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    /// Setting name
    pub name: String,
    /// Setting value
    pub value: Value,
    /// 1-based line where the setting starts
    pub line: usize,
}
