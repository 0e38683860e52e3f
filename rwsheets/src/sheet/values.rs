//! Constructors for `userEnteredValue` cell values

use crate::api::models::ExtendedValue;

/// Boolean value, e.g. the state of a checkbox
pub fn bool_value(value: bool) -> ExtendedValue {
    ExtendedValue {
        bool_value: Some(value),
        ..Default::default()
    }
}

/// Formula value, e.g. `=SUM(B2:B9)`
pub fn formula_value(value: impl Into<String>) -> ExtendedValue {
    ExtendedValue {
        formula_value: Some(value.into()),
        ..Default::default()
    }
}

pub fn text_value(value: impl Into<String>) -> ExtendedValue {
    ExtendedValue {
        string_value: Some(value.into()),
        ..Default::default()
    }
}

/// Number value. Dates are numbers too: pass a serial from
/// [`serial_date`](crate::sheet::date::serial_date).
pub fn number_value(value: f64) -> ExtendedValue {
    ExtendedValue {
        number_value: Some(value),
        ..Default::default()
    }
}

/// Best-effort plain text of a cell value, as used when printing sheets
pub fn display_value(value: &ExtendedValue) -> String {
    if let Some(s) = &value.string_value {
        s.clone()
    } else if let Some(n) = value.number_value {
        n.to_string()
    } else if let Some(b) = value.bool_value {
        b.to_string().to_uppercase()
    } else if let Some(f) = &value.formula_value {
        f.clone()
    } else if let Some(e) = &value.error_value {
        e.error_type.clone().unwrap_or_else(|| "#ERROR!".to_string())
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_field_set() {
        let b = bool_value(true);
        assert_eq!(b.bool_value, Some(true));
        assert!(b.string_value.is_none() && b.number_value.is_none() && b.formula_value.is_none());

        let f = formula_value("=A1+1");
        assert_eq!(f.formula_value.as_deref(), Some("=A1+1"));
        assert!(f.string_value.is_none());

        let t = text_value(String::from("INV-001"));
        assert_eq!(t.string_value.as_deref(), Some("INV-001"));

        let n = number_value(12.5);
        assert_eq!(n.number_value, Some(12.5));
        assert!(n.bool_value.is_none());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&text_value("x")), "x");
        assert_eq!(display_value(&number_value(44987.0)), "44987");
        assert_eq!(display_value(&bool_value(false)), "FALSE");
        assert_eq!(display_value(&ExtendedValue::default()), "");
    }
}
