//! Number formats and color presets

use crate::api::models::{Color, NumberFormat, NumberFormatType};

/// Sheets' built-in accounting pattern
pub const ACCOUNTING_PATTERN: &str = r#"_($* #,##0.00_);_($* (#,##0.00);_($* "-"??_);_(@_)"#;
pub const DEFAULT_DATE_PATTERN: &str = "M/d/yyyy";
pub const DEFAULT_DATE_TIME_PATTERN: &str = "M/d/yyyy H:mm:ss";

pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const LIGHT_GRAY: Color = Color::rgb(0.85, 0.85, 0.85);
pub const DARK_GRAY: Color = Color::rgb(0.4, 0.4, 0.4);
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

impl Color {
    /// Opaque color from channels in `[0, 1]`
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            alpha: None,
        }
    }

    /// Color from 8-bit channels, e.g. `Color::rgb8(0x4a, 0x86, 0xe8)`
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
        )
    }
}

pub fn number_format(format_type: NumberFormatType, pattern: impl Into<String>) -> NumberFormat {
    NumberFormat {
        format_type,
        pattern: Some(pattern.into()),
    }
}

/// Date format, `pattern` uses Sheets date tokens such as `M/d/yyyy`
pub fn date_format(pattern: impl Into<String>) -> NumberFormat {
    number_format(NumberFormatType::Date, pattern)
}

pub fn date_time_format(pattern: impl Into<String>) -> NumberFormat {
    number_format(NumberFormatType::DateTime, pattern)
}

pub fn time_format(pattern: impl Into<String>) -> NumberFormat {
    number_format(NumberFormatType::Time, pattern)
}

pub fn accounting_format() -> NumberFormat {
    number_format(NumberFormatType::Number, ACCOUNTING_PATTERN)
}

pub fn currency_format(pattern: impl Into<String>) -> NumberFormat {
    number_format(NumberFormatType::Currency, pattern)
}

pub fn percent_format(pattern: impl Into<String>) -> NumberFormat {
    number_format(NumberFormatType::Percent, pattern)
}

/// Plain text; numbers typed into the cell stay text
pub fn text_format() -> NumberFormat {
    NumberFormat {
        format_type: NumberFormatType::Text,
        pattern: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_format() {
        let format = date_format(DEFAULT_DATE_PATTERN);
        assert_eq!(
            serde_json::to_value(&format).unwrap(),
            json!({ "type": "DATE", "pattern": "M/d/yyyy" })
        );
    }

    #[test]
    fn test_accounting_format() {
        let format = accounting_format();
        assert_eq!(format.format_type, NumberFormatType::Number);
        assert_eq!(format.pattern.as_deref(), Some(ACCOUNTING_PATTERN));
    }

    #[test]
    fn test_text_format_has_no_pattern() {
        assert_eq!(
            serde_json::to_value(text_format()).unwrap(),
            json!({ "type": "TEXT" })
        );
    }

    #[test]
    fn test_percent_and_currency() {
        assert_eq!(percent_format("0.00%").format_type, NumberFormatType::Percent);
        assert_eq!(currency_format("$#,##0.00").format_type, NumberFormatType::Currency);
        assert_eq!(date_time_format(DEFAULT_DATE_TIME_PATTERN).format_type, NumberFormatType::DateTime);
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(WHITE.red, Some(1.0));
        assert!(BLACK.alpha.is_none());
        assert_eq!(Color::rgb8(255, 0, 0), RED);
        assert_eq!(
            serde_json::to_value(BLUE).unwrap(),
            json!({ "red": 0.0, "green": 0.0, "blue": 1.0 })
        );
    }
}
