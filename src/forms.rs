//! Form input validation.
//!
//! Raw form text is turned into typed store input here, so handlers and the
//! CLI never see parse failures from the store itself.

use crate::db::{NewAuthor, NewBook};
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Date format accepted by the forms (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        AppError::InvalidFormat(format!(
            "{} must be a date in YYYY-MM-DD form, got '{}': {}",
            field, value, e
        ))
    })
}

/// Parse an optional date. Empty input means no value.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(field, v).map(Some),
    }
}

/// Parse an integer field.
pub fn parse_integer<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        AppError::InvalidFormat(format!("{} must be an integer, got '{}'", field, value))
    })
}

fn required_text(field: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidFormat(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Raw "add author" form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    /// Author name.
    #[serde(default)]
    pub name: String,
    /// Birth date text.
    #[serde(default)]
    pub birth_date: String,
    /// Date of death text, may be empty.
    #[serde(default)]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    /// Validate into store input.
    pub fn validate(&self) -> Result<NewAuthor> {
        Ok(NewAuthor {
            name: required_text("name", &self.name)?,
            birth_date: Some(parse_date("birth_date", &self.birth_date)?),
            date_of_death: parse_optional_date("date_of_death", self.date_of_death.as_deref())?,
        })
    }
}

/// Raw "add book" form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    /// Book title.
    #[serde(default)]
    pub title: String,
    /// ISBN text.
    #[serde(default)]
    pub isbn: String,
    /// Publication year text.
    #[serde(default)]
    pub publication_year: String,
    /// Selected author ID text.
    #[serde(default)]
    pub author_id: String,
}

impl BookForm {
    /// Validate into store input.
    pub fn validate(&self) -> Result<NewBook> {
        Ok(NewBook {
            title: required_text("title", &self.title)?,
            isbn: required_text("isbn", &self.isbn)?,
            publication_year: Some(parse_integer("publication_year", &self.publication_year)?),
            author_id: parse_integer("author_id", &self.author_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_date() {
        let date = parse_date("birth_date", "1775-12-16").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1775, 12, 16).unwrap());
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["16/12/1775", "1775-13-01", "1775-02-30", "", "yesterday"] {
            let err = parse_date("birth_date", bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidFormat(_)), "{bad}");
        }
    }

    #[test]
    fn blank_optional_date_is_none() {
        assert_eq!(parse_optional_date("date_of_death", None).unwrap(), None);
        assert_eq!(parse_optional_date("date_of_death", Some("")).unwrap(), None);
        assert_eq!(parse_optional_date("date_of_death", Some("  ")).unwrap(), None);
        assert!(parse_optional_date("date_of_death", Some("soon")).is_err());
    }

    #[test]
    fn author_form_validation() {
        let form = AuthorForm {
            name: " Jane Austen ".to_string(),
            birth_date: "1775-12-16".to_string(),
            date_of_death: Some("1817-07-18".to_string()),
        };
        let author = form.validate().unwrap();
        assert_eq!(author.name, " Jane Austen ");
        assert_eq!(author.date_of_death, NaiveDate::from_ymd_opt(1817, 7, 18));

        let blank_name = AuthorForm {
            name: "   ".to_string(),
            ..form.clone()
        };
        assert!(matches!(
            blank_name.validate(),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn death_before_birth_is_accepted() {
        let form = AuthorForm {
            name: "Backwards".to_string(),
            birth_date: "1900-01-01".to_string(),
            date_of_death: Some("1800-01-01".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn book_form_validation() {
        let form = BookForm {
            title: "Emma".to_string(),
            isbn: "111".to_string(),
            publication_year: "1815".to_string(),
            author_id: "1".to_string(),
        };
        let book = form.validate().unwrap();
        assert_eq!(book.publication_year, Some(1815));
        assert_eq!(book.author_id, 1);

        let padded = BookForm {
            title: " Emma ".to_string(),
            isbn: " 111".to_string(),
            publication_year: "3000000000".to_string(),
            ..form.clone()
        };
        let book = padded.validate().unwrap();
        assert_eq!(book.title, " Emma ");
        assert_eq!(book.isbn, " 111");
        assert_eq!(book.publication_year, Some(3_000_000_000));

        let blank_title = BookForm {
            title: "  ".to_string(),
            ..form.clone()
        };
        assert!(matches!(
            blank_title.validate(),
            Err(AppError::InvalidFormat(_))
        ));

        let bad_year = BookForm {
            publication_year: "eighteen fifteen".to_string(),
            ..form.clone()
        };
        assert!(matches!(bad_year.validate(), Err(AppError::InvalidFormat(_))));

        let bad_author = BookForm {
            author_id: "".to_string(),
            ..form
        };
        assert!(matches!(
            bad_author.validate(),
            Err(AppError::InvalidFormat(_))
        ));
    }
}
