use crate::crs::Lv95;

/// A named point from the swissTLMRegio `NamedLocation` layer
/// (`NAMN1` attribute), used to resolve place names to junctions.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocation {
    pub name: String,
    pub position: Lv95,
}

impl NamedLocation {
    pub fn new(name: impl Into<String>, position: Lv95) -> Self {
        NamedLocation {
            name: name.into(),
            position,
        }
    }
}
