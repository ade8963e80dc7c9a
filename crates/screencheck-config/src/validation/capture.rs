use super::helpers::validate_range;
use crate::schema::ScreenCheckConfig;

pub(crate) fn validate_capture(errors: &mut Vec<String>, config: &ScreenCheckConfig) {
    validate_range(
        errors,
        "capture.frame_rate_ideal",
        config.capture.frame_rate_ideal,
        1,
        120,
    );
    validate_range(
        errors,
        "capture.event_capacity",
        config.capture.event_capacity,
        1,
        4096,
    );
}
