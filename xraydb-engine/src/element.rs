use std::fmt;

/// Anything a caller may use to name an element: a symbol, a name, an
/// atomic number, or an atomic number written as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId<'a> {
    Symbol(&'a str),
    Number(i64),
}

impl<'a> From<&'a str> for ElementId<'a> {
    fn from(s: &'a str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(z) => ElementId::Number(z),
            Err(_) => ElementId::Symbol(s),
        }
    }
}

impl<'a> From<&'a String> for ElementId<'a> {
    fn from(s: &'a String) -> Self {
        ElementId::from(s.as_str())
    }
}

macro_rules! element_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for ElementId<'_> {
            fn from(z: $t) -> Self {
                ElementId::Number(z as i64)
            }
        })*
    };
}

element_id_from_int!(u8, u16, u32, i32, i64);

impl From<usize> for ElementId<'_> {
    fn from(z: usize) -> Self {
        ElementId::Number(i64::try_from(z).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for ElementId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Symbol(s) => f.write_str(s),
            ElementId::Number(z) => write!(f, "{z}"),
        }
    }
}

/// Constants for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub atomic_number: u16,
    pub symbol: String,
    pub name: String,
    /// g/mol
    pub molar_mass: f64,
    /// g/cm³, pure element at standard conditions
    pub density: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_become_numbers() {
        assert_eq!(ElementId::from("47"), ElementId::Number(47));
        assert_eq!(ElementId::from(" 8 "), ElementId::Number(8));
        assert_eq!(ElementId::from("Ag"), ElementId::Symbol("Ag"));
        assert_eq!(ElementId::from(47u16), ElementId::Number(47));
        assert_eq!(ElementId::from(-3i32), ElementId::Number(-3));
    }
}
