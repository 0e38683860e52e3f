//! Cell border configuration

use crate::api::models::{Border, BorderStyle, Borders, Color};
use crate::sheet::format::BLACK;

/// Which sides of a cell get a border, and how it looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderConf {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub style: BorderStyle,
    pub color: Color,
}

impl Default for BorderConf {
    fn default() -> Self {
        Self::NONE
    }
}

impl BorderConf {
    /// No borders at all
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
        left: false,
        right: false,
        style: BorderStyle::Solid,
        color: BLACK,
    };

    /// Thin solid border on every side
    pub const ALL_SOLID: Self = Self {
        top: true,
        bottom: true,
        left: true,
        right: true,
        style: BorderStyle::Solid,
        color: BLACK,
    };

    /// Medium border on every side, for header rows
    pub const HEADER: Self = Self {
        style: BorderStyle::SolidMedium,
        ..Self::ALL_SOLID
    };

    /// Solid border on every side but the top, for the first row under a header
    pub const OPEN_TOP: Self = Self {
        top: false,
        ..Self::ALL_SOLID
    };

    pub const fn all(style: BorderStyle) -> Self {
        Self {
            style,
            ..Self::ALL_SOLID
        }
    }

    pub const fn with_top(self, top: bool) -> Self {
        Self { top, ..self }
    }

    pub const fn with_bottom(self, bottom: bool) -> Self {
        Self { bottom, ..self }
    }

    pub const fn with_left(self, left: bool) -> Self {
        Self { left, ..self }
    }

    pub const fn with_right(self, right: bool) -> Self {
        Self { right, ..self }
    }

    pub const fn with_style(self, style: BorderStyle) -> Self {
        Self { style, ..self }
    }

    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }

    /// Borders for the enabled sides only
    pub fn to_borders(&self) -> Borders {
        let side = |enabled: bool| {
            enabled.then(|| Border {
                style: self.style,
                color: Some(self.color),
            })
        };

        Borders {
            top: side(self.top),
            bottom: side(self.bottom),
            left: side(self.left),
            right: side(self.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presets() {
        assert!(BorderConf::NONE.is_empty());
        assert_eq!(BorderConf::NONE.to_borders(), Borders::default());

        assert_eq!(BorderConf::HEADER.style, BorderStyle::SolidMedium);
        assert!(BorderConf::HEADER.top && BorderConf::HEADER.bottom);

        assert!(!BorderConf::OPEN_TOP.top);
        assert!(BorderConf::OPEN_TOP.left && BorderConf::OPEN_TOP.right && BorderConf::OPEN_TOP.bottom);
    }

    #[test]
    fn test_only_enabled_sides() {
        let borders = BorderConf::OPEN_TOP.to_borders();

        assert!(borders.top.is_none());
        let bottom = borders.bottom.unwrap();
        assert_eq!(bottom.style, BorderStyle::Solid);
        assert_eq!(bottom.color, Some(BLACK));
    }

    #[test]
    fn test_modifiers_copy() {
        let base = BorderConf::OPEN_TOP;
        let closed = base.with_top(true).with_style(BorderStyle::Dashed);

        assert!(!base.top);
        assert!(closed.top);
        assert_eq!(closed.style, BorderStyle::Dashed);
        assert_eq!(BorderConf::all(BorderStyle::Double).style, BorderStyle::Double);
    }

    #[test]
    fn test_serialized_borders() {
        let borders = BorderConf::NONE.with_left(true).to_borders();
        assert_eq!(
            serde_json::to_value(borders).unwrap(),
            json!({ "left": { "style": "SOLID", "color": { "red": 0.0, "green": 0.0, "blue": 0.0 } } })
        );
    }
}
