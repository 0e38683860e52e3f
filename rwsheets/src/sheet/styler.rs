//! Fluent builder for formatted cells
//!
//! A `Styler` is a plain value: every setter consumes it and returns the updated
//! copy, so a base style can be cloned and specialised per column without the
//! variants affecting each other.
//!
//! ```ignore
//! let header = Styler::new().font_bold(true).font_size(12).horizontal_alignment(HorizontalAlign::Center);
//! let mut rows = header.header_row(&["Customer", "Amount"], &BorderConf::HEADER);
//!
//! let body = header.font_bold(false).font_size(10);
//! let amount = body.clone().horizontal_alignment(HorizontalAlign::Right).accounting_cell(12.5, &BorderConf::ALL_SOLID);
//! ```

use crate::api::models::{
    BooleanCondition, CellData, CellFormat, Color, ConditionType, DataValidationRule,
    ExtendedValue, HorizontalAlign, NumberFormat, NumberFormatType, RowData, TextFormat,
    VerticalAlign, WrapStrategy,
};
use crate::error::Result;
use crate::sheet::border::BorderConf;
use crate::sheet::date::serial_date;
use crate::sheet::format::{DEFAULT_DATE_PATTERN, accounting_format, date_format, number_format};
use crate::sheet::values::{bool_value, formula_value, number_value, text_value};

/// Formatting applied to every cell the styler creates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styler {
    bold: Option<bool>,
    italic: Option<bool>,
    font_family: Option<String>,
    font_size: Option<i64>,
    foreground: Option<Color>,
    background: Option<Color>,
    horizontal: Option<HorizontalAlign>,
    vertical: Option<VerticalAlign>,
    wrap: Option<WrapStrategy>,
    date_pattern: Option<String>,
    number_pattern: Option<String>,
}

impl Styler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn font_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_size(mut self, size: i64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn foreground_color(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn horizontal_alignment(mut self, align: HorizontalAlign) -> Self {
        self.horizontal = Some(align);
        self
    }

    pub fn vertical_alignment(mut self, align: VerticalAlign) -> Self {
        self.vertical = Some(align);
        self
    }

    pub fn wrap_strategy(mut self, wrap: WrapStrategy) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Display pattern for date cells, `M/d/yyyy` when unset
    pub fn date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = Some(pattern.into());
        self
    }

    /// Display pattern for number cells, e.g. `#,##0.00`
    pub fn number_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.number_pattern = Some(pattern.into());
        self
    }

    fn text_style(&self) -> Option<TextFormat> {
        let text = TextFormat {
            foreground_color: self.foreground,
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            bold: self.bold,
            italic: self.italic,
            ..Default::default()
        };
        (text != TextFormat::default()).then_some(text)
    }

    /// The cell format this styler currently produces, without borders
    pub fn format(&self) -> CellFormat {
        CellFormat {
            background_color: self.background,
            horizontal_alignment: self.horizontal,
            vertical_alignment: self.vertical,
            wrap_strategy: self.wrap,
            text_format: self.text_style(),
            ..Default::default()
        }
    }

    fn cell(
        &self,
        value: ExtendedValue,
        number_format: Option<NumberFormat>,
        borders: &BorderConf,
    ) -> CellData {
        let mut format = self.format();
        format.number_format = number_format;
        if !borders.is_empty() {
            format.borders = Some(borders.to_borders());
        }

        CellData {
            user_entered_value: Some(value),
            user_entered_format: Some(format),
            ..Default::default()
        }
    }

    pub fn text_cell(&self, value: impl Into<String>, borders: &BorderConf) -> CellData {
        self.cell(text_value(value), None, borders)
    }

    pub fn number_cell(&self, value: f64, borders: &BorderConf) -> CellData {
        let format = self
            .number_pattern
            .as_ref()
            .map(|pattern| number_format(NumberFormatType::Number, pattern.clone()));
        self.cell(number_value(value), format, borders)
    }

    /// Number shown with the accounting format
    pub fn accounting_cell(&self, value: f64, borders: &BorderConf) -> CellData {
        self.cell(number_value(value), Some(accounting_format()), borders)
    }

    pub fn formula_cell(&self, formula: impl Into<String>, borders: &BorderConf) -> CellData {
        self.cell(formula_value(formula), None, borders)
    }

    /// Date cell from `value` parsed with `layout` (see [`serial_date`])
    pub fn date_cell(&self, value: &str, layout: &str, borders: &BorderConf) -> Result<CellData> {
        let serial = serial_date(value, layout)?;
        let pattern = self
            .date_pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_PATTERN.to_string());
        Ok(self.cell(number_value(serial), Some(date_format(pattern)), borders))
    }

    /// Checkbox: a boolean value restricted by a BOOLEAN validation rule
    pub fn checkbox_cell(&self, checked: bool, borders: &BorderConf) -> CellData {
        let mut cell = self.cell(bool_value(checked), None, borders);
        cell.data_validation = Some(DataValidationRule {
            condition: BooleanCondition {
                condition_type: ConditionType::Boolean,
                values: Vec::new(),
            },
            input_message: None,
            strict: true,
            show_custom_ui: true,
        });
        cell
    }

    /// A single row of text cells, one per header
    pub fn header_row<S: AsRef<str>>(&self, headers: &[S], borders: &BorderConf) -> Vec<RowData> {
        let cells = headers
            .iter()
            .map(|header| self.text_cell(header.as_ref(), borders))
            .collect();
        vec![RowData::new(cells)]
    }
}
