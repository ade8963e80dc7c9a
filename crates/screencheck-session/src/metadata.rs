//! Stream metadata extraction from a video track's reported settings.

use screencheck_common::{DisplaySurface, StreamMetadata};

use crate::provider::TrackSettings;

/// Maps the platform's surface string onto a known kind, ignoring case.
pub fn map_display_surface(reported: Option<&str>) -> DisplaySurface {
    let Some(reported) = reported else {
        return DisplaySurface::Unknown;
    };
    match reported.trim().to_ascii_lowercase().as_str() {
        "monitor" => DisplaySurface::Monitor,
        "window" => DisplaySurface::Window,
        "browser" => DisplaySurface::Browser,
        _ => DisplaySurface::Unknown,
    }
}

pub fn extract_metadata(settings: &TrackSettings) -> StreamMetadata {
    StreamMetadata {
        display_surface: map_display_surface(settings.display_surface.as_deref()),
        width: settings.width.unwrap_or(0),
        height: settings.height.unwrap_or(0),
        frame_rate: settings
            .frame_rate
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .unwrap_or(0.0),
    }
}
