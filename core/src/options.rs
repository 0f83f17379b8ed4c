//! Configuration for rendering values as text.

use std::borrow::Cow;

/// Controls how `TypedValue` renders itself as text.
///
/// # Example
///
/// ```
/// use paramval_core::FormatOptions;
///
/// let options = FormatOptions {
///     element_separator: " ; ".into(),
///     ..FormatOptions::default()
/// };
/// assert!(options.quote_strings);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Placed between array elements (and between values of a multi-value
    /// attribute).
    ///
    /// Default: `", "`
    pub element_separator: Cow<'static, str>,

    /// Placed between the components of one aggregate element.
    ///
    /// Default: `", "`
    pub aggregate_separator: Cow<'static, str>,

    /// Wrap string values in double quotes.
    ///
    /// Default: true
    pub quote_strings: bool,

    /// Escape `"`, `\`, newlines and tabs inside quoted strings.
    ///
    /// Default: true
    pub escape_strings: bool,
}

impl FormatOptions {
    /// Layout used by `TypedValue::get_string`.
    pub const LISTING: FormatOptions = FormatOptions {
        element_separator: Cow::Borrowed(", "),
        aggregate_separator: Cow::Borrowed(", "),
        quote_strings: true,
        escape_strings: true,
    };

    /// Layout used when rendering a single element: components separated by
    /// spaces and strings left bare.
    pub const ELEMENT: FormatOptions = FormatOptions {
        element_separator: Cow::Borrowed(", "),
        aggregate_separator: Cow::Borrowed(" "),
        quote_strings: false,
        escape_strings: false,
    };
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::LISTING
    }
}
