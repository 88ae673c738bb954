//! Validation Utilities

use validator::{Validate, ValidationError, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
///
/// Every failing rule is kept. Field names are reported in camelCase to match
/// the JSON bodies clients send, sorted for stable output.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(field);
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));

    AppError::Validation(field_errors)
}

/// Run `validator` rules and map failures into [`AppError::Validation`].
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(validation_error)
}

/// Password complexity policy: at least 8 characters with an uppercase
/// letter, a lowercase letter, a digit and a symbol.
pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && has_upper && has_lower && has_digit && has_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("password_complexity").with_message(
            "Password must be at least 8 characters and contain an uppercase letter, \
             a lowercase letter, a digit and a symbol"
                .into(),
        ))
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        nick_name: String,
        #[validate(email(message = "bad email"))]
        email: String,
    }

    #[test_case("Abcdef1!" ; "meets every rule")]
    #[test_case("Zz9#Zz9#Zz9#" ; "longer mix")]
    #[test_case("pässWORD1-" ; "non ascii letters")]
    fn test_password_complexity_accepts(password: &str) {
        assert!(validate_password_complexity(password).is_ok());
    }

    #[test_case("Abc1!" ; "too short")]
    #[test_case("abcdefg1!" ; "missing uppercase")]
    #[test_case("ABCDEFG1!" ; "missing lowercase")]
    #[test_case("Abcdefgh!" ; "missing digit")]
    #[test_case("Abcdefgh1" ; "missing symbol")]
    #[test_case("Abcd efg1" ; "whitespace is not a symbol")]
    fn test_password_complexity_rejects(password: &str) {
        assert!(validate_password_complexity(password).is_err());
    }

    #[test]
    fn test_validation_error_aggregates_fields_in_camel_case() {
        let sample = Sample {
            nick_name: "ab".into(),
            email: "nope".into(),
        };

        let err = validate(&sample).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(
                    errors,
                    vec![
                        FieldError::new("email", "bad email"),
                        FieldError::new("nickName", "too short"),
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_passes_valid_input() {
        let sample = Sample {
            nick_name: "abc".into(),
            email: "a@x.com".into(),
        };
        assert!(validate(&sample).is_ok());
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("name"), "name");
    }
}
