use super::app_error::AppError;

pub(super) fn map_database_error(
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<AppError> {
    match code {
        Some("23505") => Some(AppError::Conflict(
            conflict_message_from_constraint(constraint).to_string(),
        )),
        Some("23502") => Some(AppError::validation_error(
            required_field_message_from_db(message)
                .unwrap_or_else(|| "required field is missing".to_string()),
        )),
        Some("23503") => Some(AppError::BadRequest(
            "referenced resource does not exist".to_string(),
        )),
        Some("23514") => Some(AppError::validation_error(
            "request violates validation rules",
        )),
        Some("22P02") => Some(AppError::validation_error("invalid input format")),
        Some("08001") | Some("08006") => Some(AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: "Unable to connect to database. Please try again later.".to_string(),
        }),
        Some("53300") => Some(AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: "Service temporarily unavailable. Please try again later.".to_string(),
        }),
        Some("55P03") => Some(AppError::Conflict(
            "Resource is currently locked. Please try again.".to_string(),
        )),
        _ => None,
    }
}

pub(super) fn conflict_message_from_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_email_key") => "email already registered",
        Some("auth_identities_user_id_key") => "credentials already exist for this user",
        _ => "resource already exists",
    }
}

pub(super) fn required_field_message_from_db(message: &str) -> Option<String> {
    let marker = "column \"";
    let start = message.find(marker)?;
    let rest = &message[start + marker.len()..];
    let end = rest.find('"')?;
    let field = &rest[..end];
    Some(format!("{field} is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_conflict() {
        let mapped = map_database_error(Some("23505"), Some("users_email_key"), "duplicate key");
        assert!(matches!(
            mapped,
            Some(AppError::Conflict(message)) if message == "email already registered"
        ));
    }

    #[test]
    fn unknown_constraint_falls_back_to_generic_conflict() {
        let mapped = map_database_error(Some("23505"), Some("something_else"), "duplicate key");
        assert!(matches!(
            mapped,
            Some(AppError::Conflict(message)) if message == "resource already exists"
        ));
    }

    #[test]
    fn not_null_violation_names_the_column() {
        let mapped = map_database_error(
            Some("23502"),
            None,
            "null value in column \"title\" violates not-null constraint",
        );
        assert!(matches!(
            mapped,
            Some(AppError::ValidationError { message, .. }) if message == "title is required"
        ));
    }

    #[test]
    fn unknown_code_is_not_mapped() {
        assert!(map_database_error(Some("42601"), None, "syntax error").is_none());
    }

    #[test]
    fn required_field_message_handles_missing_marker() {
        assert!(required_field_message_from_db("no column marker here").is_none());
    }
}
