/// Screen-facing label attached to a scene entity.
///
/// The host renders it as an element pinned to the entity's position; `class`
/// is the style hook the host applies to that element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub class: String,
}

pub const BUILDING_GLYPH: &str = "🏢";
pub const BUILDING_CLASS: &str = "thumbnail";

impl Label {
    pub fn new(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: class.into(),
        }
    }

    pub fn building() -> Self {
        Self::new(BUILDING_GLYPH, BUILDING_CLASS)
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::building()
    }
}
