use crate::containers::DataContainer;
use crate::error::SeedError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{error, trace};
use url::Url;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// default upper bound on the number of variants a single form may expand into
pub const DEFAULT_MAX_VARIANTS: usize = 150;

/// policy controlling which values of a multi-valued form field (`<select>`,
/// radio buttons, checkboxes) are explored when a form is expanded into
/// concrete requests
///
/// single-valued fields are unaffected by the mode.
///
/// # Examples
///
/// ```
/// # use seedreq::parsers::CombinationMode;
/// # use std::str::FromStr;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(CombinationMode::from_str("tmb")?, CombinationMode::TopMiddleBottom);
/// assert_eq!(CombinationMode::from_str("exhaustive")?, CombinationMode::All);
/// assert_eq!(CombinationMode::from_str("representative")?, CombinationMode::Top);
/// assert!(CombinationMode::from_str("sideways").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombinationMode {
    /// one representative value per field: the first one
    Top,

    /// one value per field: the last one
    Bottom,

    /// first and last value of each field, cross product across fields
    TopBottom,

    /// first, middle and last value of each field, cross product across fields
    #[default]
    TopMiddleBottom,

    /// every value of each field, full cross product across fields
    All,
}

impl CombinationMode {
    /// the values of `values` that this mode explores, in their original order
    fn select<'a>(self, values: &'a [String]) -> Vec<&'a str> {
        let all = || values.iter().map(String::as_str).collect();

        let (first, last) = match (values.first(), values.last()) {
            (Some(first), Some(last)) if values.len() > 1 => (first.as_str(), last.as_str()),
            // zero or one value, nothing to choose between
            _ => return all(),
        };

        match self {
            Self::Top => vec![first],
            Self::Bottom => vec![last],
            Self::TopBottom => vec![first, last],
            Self::TopMiddleBottom if values.len() > 3 => {
                vec![first, values[values.len() / 2].as_str(), last]
            }
            Self::TopMiddleBottom | Self::All => all(),
        }
    }
}

impl FromStr for CombinationMode {
    type Err = SeedError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "t" | "top" | "representative" => Ok(Self::Top),
            "b" | "bottom" => Ok(Self::Bottom),
            "tb" | "top_bottom" => Ok(Self::TopBottom),
            "tmb" | "top_middle_bottom" => Ok(Self::TopMiddleBottom),
            "all" | "exhaustive" => Ok(Self::All),
            _ => {
                error!(%mode, "unknown form combination mode");

                Err(SeedError::InvalidCombinationMode {
                    mode: mode.to_string(),
                })
            }
        }
    }
}

impl Display for CombinationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Top => "t",
            Self::Bottom => "b",
            Self::TopBottom => "tb",
            Self::TopMiddleBottom => "tmb",
            Self::All => "all",
        };

        f.write_str(code)
    }
}

/// one named form input and every value it may take
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormField {
    name: String,
    values: Vec<String>,
}

impl FormField {
    /// get the field's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// get the field's candidate values; more than one means the field is a choice
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// an html form as produced by a [`DocumentParser`](super::DocumentParser)
///
/// # Examples
///
/// ```
/// # use seedreq::parsers::{CombinationMode, Form};
/// # use url::Url;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let form = Form::new(Url::parse("http://localhost/order")?, "post")
///     .with_field("qty", "1")
///     .with_options("size", ["s", "m", "l"]);
///
/// assert_eq!(form.variants(CombinationMode::All, 10).len(), 3);
/// assert_eq!(form.variants(CombinationMode::Top, 10).len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Form {
    action: Url,
    method: String,
    fields: Vec<FormField>,
    file_fields: Vec<String>,
}

impl Form {
    /// create a form without fields
    #[must_use]
    pub fn new(action: Url, method: &str) -> Self {
        Self {
            action,
            method: method.to_string(),
            fields: Vec::new(),
            file_fields: Vec::new(),
        }
    }

    /// add a single-valued field (text input, hidden input, textarea, ...)
    #[must_use]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            values: vec![value.to_string()],
        });
        self
    }

    /// add a field that takes one of several values (select, radio, checkbox)
    #[must_use]
    pub fn with_options<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields.push(FormField {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// add a file upload field; its value starts out empty
    #[must_use]
    pub fn with_file_field(mut self, name: &str) -> Self {
        self.file_fields.push(name.to_string());
        self.with_field(name, "")
    }

    /// get the action url
    #[must_use]
    pub const fn action(&self) -> &Url {
        &self.action
    }

    /// get the method, as written in the document
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// returns `true` when the form submits with `POST`, in any casing
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("post")
    }

    /// get the fields, in document order
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// names of the file upload fields
    #[must_use]
    pub fn file_fields(&self) -> &[String] {
        &self.file_fields
    }

    /// expand the form into concrete submissions
    ///
    /// every multi-valued field contributes the values picked by `mode`; the
    /// variants are the cross product of those picks, with the last field
    /// changing fastest. At most `max_variants` are produced (and always at
    /// least one); the product is cut off in order once the limit is hit.
    #[must_use]
    pub fn variants(&self, mode: CombinationMode, max_variants: usize) -> Vec<FormVariant> {
        let choices: Vec<Vec<&str>> = self
            .fields
            .iter()
            .map(|field| {
                let picked = mode.select(&field.values);

                if picked.is_empty() {
                    vec![""]
                } else {
                    picked
                }
            })
            .collect();

        let total = choices
            .iter()
            .map(Vec::len)
            .fold(1_usize, usize::saturating_mul);
        let limit = max_variants.max(1).min(total);

        if total > limit {
            trace!(%total, %limit, action = %self.action, "truncating form variants");
        }

        // odometer over the choice lists, rightmost position ticks first
        let mut positions = vec![0_usize; choices.len()];
        let mut variants = Vec::with_capacity(limit);

        while variants.len() < limit {
            let data = self
                .fields
                .iter()
                .zip(&choices)
                .zip(&positions)
                .map(|((field, picked), &position)| (field.name.as_str(), picked[position]))
                .collect();

            variants.push(FormVariant {
                action: self.action.clone(),
                method: self.method.clone(),
                data,
            });

            for (position, picked) in positions.iter_mut().zip(&choices).rev() {
                *position += 1;

                if *position < picked.len() {
                    break;
                }

                *position = 0;
            }
        }

        variants
    }
}

/// one concrete assignment of values to a form's fields
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormVariant {
    action: Url,
    method: String,
    data: DataContainer,
}

impl FormVariant {
    /// get the action url
    #[must_use]
    pub const fn action(&self) -> &Url {
        &self.action
    }

    /// get the method
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// get the field values
    #[must_use]
    pub const fn data_container(&self) -> &DataContainer {
        &self.data
    }

    /// consume the variant, yielding its field values
    #[must_use]
    pub fn into_data_container(self) -> DataContainer {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(Url::parse("http://localhost/f").unwrap(), "POST")
            .with_field("user", "bob")
            .with_options("color", ["red", "green", "blue", "black", "white"])
            .with_options("size", ["s", "l"])
    }

    fn values_of(variants: &[FormVariant], key: &str) -> Vec<String> {
        variants
            .iter()
            .map(|variant| variant.data_container().get_first(key).unwrap().to_string())
            .collect()
    }

    /// top and bottom pick one value per field
    #[test]
    fn top_and_bottom_yield_single_variant() {
        let top = form().variants(CombinationMode::Top, DEFAULT_MAX_VARIANTS);
        let bottom = form().variants(CombinationMode::Bottom, DEFAULT_MAX_VARIANTS);

        assert_eq!(values_of(&top, "color"), ["red"]);
        assert_eq!(values_of(&top, "size"), ["s"]);
        assert_eq!(values_of(&bottom, "color"), ["white"]);
        assert_eq!(values_of(&bottom, "user"), ["bob"]);
    }

    /// tmb picks first, middle and last of long lists, cross product across fields
    #[test]
    fn top_middle_bottom_crosses_three_picks() {
        let variants = form().variants(CombinationMode::TopMiddleBottom, DEFAULT_MAX_VARIANTS);

        assert_eq!(variants.len(), 6);
        assert_eq!(
            values_of(&variants, "color"),
            ["red", "red", "blue", "blue", "white", "white"]
        );
        assert_eq!(values_of(&variants, "size"), ["s", "l", "s", "l", "s", "l"]);
    }

    /// all explores every value
    #[test]
    fn all_is_full_cross_product() {
        let variants = form().variants(CombinationMode::All, DEFAULT_MAX_VARIANTS);

        assert_eq!(variants.len(), 10);
        assert!(variants.iter().all(|v| v.data_container().get_first("user") == Some("bob")));
    }

    /// tb takes the two ends
    #[test]
    fn top_bottom_takes_both_ends() {
        let variants = form().variants(CombinationMode::TopBottom, DEFAULT_MAX_VARIANTS);

        assert_eq!(variants.len(), 4);
        assert_eq!(values_of(&variants, "color"), ["red", "red", "white", "white"]);
    }

    /// the cap truncates in product order and never yields zero variants
    #[test]
    fn variants_respect_the_cap() {
        assert_eq!(form().variants(CombinationMode::All, 3).len(), 3);
        assert_eq!(form().variants(CombinationMode::All, 0).len(), 1);
    }

    /// a form without fields still submits once
    #[test]
    fn empty_form_yields_one_empty_variant() {
        let form = Form::new(Url::parse("http://localhost/").unwrap(), "get");
        let variants = form.variants(CombinationMode::All, DEFAULT_MAX_VARIANTS);

        assert_eq!(variants.len(), 1);
        assert!(variants[0].data_container().is_empty());
        assert!(!form.is_post());
    }

    /// file fields are recorded and submitted empty
    #[test]
    fn file_fields_are_tracked() {
        let form = Form::new(Url::parse("http://localhost/").unwrap(), "post")
            .with_file_field("avatar");

        assert_eq!(form.file_fields(), ["avatar"]);
        assert_eq!(form.fields()[0].values(), [""]);
        assert!(form.is_post());
    }

    /// display round-trips through from_str
    #[test]
    fn display_matches_short_codes() {
        for mode in [
            CombinationMode::Top,
            CombinationMode::Bottom,
            CombinationMode::TopBottom,
            CombinationMode::TopMiddleBottom,
            CombinationMode::All,
        ] {
            assert_eq!(CombinationMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }
}
