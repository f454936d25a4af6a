//! Brazilian postal codes (CEP) and delivery addresses.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of digits in a CEP.
pub const POSTAL_CODE_LEN: usize = 8;

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input is empty.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input does not have exactly eight digits.
    #[error("postal code must have 8 digits (got {0})")]
    WrongLength(usize),
    /// The input contains something other than digits.
    #[error("postal code must contain only digits")]
    NonDigit,
}

/// An eight-digit Brazilian postal code.
///
/// Surrounding whitespace and a hyphen after the fifth digit (`01001-000`)
/// are accepted on input and stripped.
///
/// ```
/// use murela_core::PostalCode;
///
/// assert_eq!(PostalCode::parse("01001-000").unwrap().as_str(), "01001000");
/// assert!(PostalCode::parse("0100100").is_err());
/// assert!(PostalCode::parse("0100100a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse and normalize a postal code.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError`] if the input is empty, has the wrong
    /// number of digits, or contains non-digit characters.
    pub fn parse(input: &str) -> Result<Self, PostalCodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PostalCodeError::Empty);
        }
        let digits = match trimmed.split_once('-') {
            None => trimmed.to_string(),
            Some((head, tail)) if head.len() == 5 && !tail.contains('-') => {
                format!("{head}{tail}")
            }
            Some(_) => return Err(PostalCodeError::NonDigit),
        };
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PostalCodeError::NonDigit);
        }
        if digits.len() != POSTAL_CODE_LEN {
            return Err(PostalCodeError::WrongLength(digits.len()));
        }
        Ok(Self(digits))
    }

    /// The eight digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

/// Address form fields, used to report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Cep,
    Street,
    Number,
    City,
    State,
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cep => "CEP",
            Self::Street => "street",
            Self::Number => "number",
            Self::City => "city",
            Self::State => "state",
        })
    }
}

/// Delivery address as entered in the checkout form.
///
/// The CEP is kept as typed so a partially entered form can round-trip;
/// use [`Address::postal_code`] to validate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl Address {
    /// Required fields that are blank.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<AddressField> {
        [
            (AddressField::Cep, &self.cep),
            (AddressField::Street, &self.street),
            (AddressField::Number, &self.number),
            (AddressField::City, &self.city),
            (AddressField::State, &self.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// The CEP, validated.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError`] if the CEP field is not a valid postal code.
    pub fn postal_code(&self) -> Result<PostalCode, PostalCodeError> {
        PostalCode::parse(&self.cep)
    }

    /// Overwrite the street, neighborhood, city and state with a lookup result.
    pub fn apply_lookup(&mut self, found: AddressLookupResult) {
        self.street = found.street;
        self.neighborhood = found.neighborhood;
        self.city = found.city;
        self.state = found.state;
    }
}

/// Address returned by a postal code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookupResult {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_errors() {
        assert_eq!(PostalCode::parse("  "), Err(PostalCodeError::Empty));
        assert_eq!(PostalCode::parse("123"), Err(PostalCodeError::WrongLength(3)));
        assert_eq!(PostalCode::parse("1234567x"), Err(PostalCodeError::NonDigit));
    }

    #[test]
    fn test_postal_code_hyphen_only_after_fifth_digit() {
        assert_eq!(PostalCode::parse(" 01001-000 ").unwrap().as_str(), "01001000");
        assert_eq!(PostalCode::parse("0-1-0-0-1-0-0-0"), Err(PostalCodeError::NonDigit));
        assert_eq!(PostalCode::parse("0100-1000"), Err(PostalCodeError::NonDigit));
        assert_eq!(PostalCode::parse("01001--000"), Err(PostalCodeError::NonDigit));
        assert_eq!(PostalCode::parse("01001-00"), Err(PostalCodeError::WrongLength(7)));
    }

    #[test]
    fn test_postal_code_serde_validates() {
        let code: PostalCode = serde_json::from_str("\"20010-000\"").unwrap();
        assert_eq!(code.as_str(), "20010000");
        assert!(serde_json::from_str::<PostalCode>("\"2001\"").is_err());
    }

    #[test]
    fn test_missing_required_fields() {
        let address = Address {
            cep: "01001000".to_string(),
            street: "Praça da Sé".to_string(),
            city: " ".to_string(),
            ..Address::default()
        };
        assert_eq!(
            address.missing_required_fields(),
            vec![AddressField::Number, AddressField::City, AddressField::State]
        );
        assert!(!address.is_complete());
    }

    #[test]
    fn test_complement_and_neighborhood_are_optional() {
        let address = Address {
            cep: "01001000".to_string(),
            street: "Praça da Sé".to_string(),
            number: "1".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            ..Address::default()
        };
        assert!(address.is_complete());
    }

    #[test]
    fn test_apply_lookup_keeps_number() {
        let mut address = Address {
            cep: "20010000".to_string(),
            number: "100".to_string(),
            street: "old".to_string(),
            ..Address::default()
        };
        address.apply_lookup(AddressLookupResult {
            street: "Avenida Rio Branco".to_string(),
            neighborhood: "Centro".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
        });
        assert_eq!(address.street, "Avenida Rio Branco");
        assert_eq!(address.number, "100");
    }
}
