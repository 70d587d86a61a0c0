//! Card domain models.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::CARD_NAME_MAX_CHARS;
use crate::errors::{Error, Result, ValidationError};

/// Card network, detected from the number's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Other,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Discover => "discover",
            CardBrand::Other => "other",
        }
    }

    /// Brand for a digits-only card number.
    pub fn detect(digits: &str) -> Self {
        let prefix = |n: usize| digits.get(..n).and_then(|p| p.parse::<u32>().ok());
        match (prefix(1), prefix(2), prefix(4)) {
            (Some(4), _, _) => CardBrand::Visa,
            (_, Some(34 | 37), _) => CardBrand::Amex,
            (_, Some(51..=55), _) | (_, _, Some(2221..=2720)) => CardBrand::Mastercard,
            (_, Some(65), _) | (_, _, Some(6011)) => CardBrand::Discover,
            _ => CardBrand::Other,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardBrand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "visa" => Ok(CardBrand::Visa),
            "mastercard" => Ok(CardBrand::Mastercard),
            "amex" => Ok(CardBrand::Amex),
            "discover" => Ok(CardBrand::Discover),
            "other" => Ok(CardBrand::Other),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown card brand '{}'",
                other
            )))),
        }
    }
}

/// Month and year a card stops being valid after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardExpiry {
    pub month: u32,
    pub year: i32,
}

impl CardExpiry {
    /// Parses `MM/YY` or `MM/YYYY`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::from(ValidationError::field("expiryDate", "must be MM/YY"));
        let (month, year) = text.trim().split_once('/').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(month) || !all_digits(year) {
            return Err(invalid());
        }
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = match year.len() {
            2 => 2000 + year.parse::<i32>().map_err(|_| invalid())?,
            4 => year.parse().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };
        if !(1..=12).contains(&month) {
            return Err(ValidationError::field("expiryDate", "month must be 01-12").into());
        }
        Ok(CardExpiry { month, year })
    }

    /// A card is usable through the last day of its expiry month.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        (self.year, self.month) < (today.year(), today.month())
    }
}

impl fmt::Display for CardExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Luhn checksum over a digits-only string.
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

/// A registered card, without its number or security code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub account_id: String,
    pub card_name: String,
    pub last4: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub brand: CardBrand,
    pub created_at: NaiveDateTime,
}

/// Card details as submitted by a client.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCard {
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for NewCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCard")
            .field("card_name", &self.card_name)
            .field("expiry_date", &self.expiry_date)
            .finish_non_exhaustive()
    }
}

/// What gets stored for a new card.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCardRecord {
    pub card_name: String,
    pub last4: String,
    pub expiry_date: String,
    pub brand: CardBrand,
}

impl NewCard {
    /// Validates the card and reduces it to the fields that are stored.
    pub fn into_record(self, today: NaiveDate) -> Result<NewCardRecord> {
        let card_name = self.card_name.trim().to_string();
        if card_name.is_empty() {
            return Err(ValidationError::MissingField("cardName".to_string()).into());
        }
        if card_name.chars().count() > CARD_NAME_MAX_CHARS {
            return Err(ValidationError::field(
                "cardName",
                format!("cannot exceed {} characters", CARD_NAME_MAX_CHARS),
            )
            .into());
        }

        let digits: String = self
            .card_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        if !(12..=19).contains(&digits.len()) || !luhn_valid(&digits) {
            return Err(ValidationError::field("cardNumber", "is not a valid card number").into());
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::field("cvv", "must be 3 or 4 digits").into());
        }

        let expiry = CardExpiry::parse(&self.expiry_date)?;
        if expiry.is_expired(today) {
            return Err(ValidationError::field("expiryDate", "card has expired").into());
        }

        Ok(NewCardRecord {
            card_name,
            last4: digits[digits.len() - 4..].to_string(),
            expiry_date: expiry.to_string(),
            brand: CardBrand::detect(&digits),
        })
    }
}
