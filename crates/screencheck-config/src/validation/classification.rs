use crate::schema::ScreenCheckConfig;

/// An empty list is allowed (every refusal is a denial); blank entries are not.
pub(crate) fn validate_classification(errors: &mut Vec<String>, config: &ScreenCheckConfig) {
    for (i, keyword) in config
        .classification
        .permission_cancel_keywords
        .iter()
        .enumerate()
    {
        if keyword.trim().is_empty() {
            errors.push(format!(
                "classification.permission_cancel_keywords[{i}] must not be blank"
            ));
        }
    }
}
