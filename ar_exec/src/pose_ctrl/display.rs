//! Instruction banner text

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::Params;
use comms_if::{
    eqpt::ar::{BackgroundCategory, DisplayState},
    nav::NavSample,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

pub const ICON_DESTINATION: &str = "🏁";
pub const ICON_TURN: &str = "🔄";
pub const ICON_CONTINUE: &str = "⬆️";
pub const ICON_AWAY: &str = "📍";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the banner state for a navigation sample.
pub fn calc_display(sample: &NavSample, params: &Params) -> DisplayState {
    let distance_str = format_distance(sample.distance_m);

    let (background, secondary_text) = if sample.is_final_step {
        (
            BackgroundCategory::Destination,
            format!("{} Destination", ICON_DESTINATION),
        )
    } else if sample.distance_m < params.near_turn_distance_m {
        (
            BackgroundCategory::NearTurn,
            format!("{} Turn ahead in {}", ICON_TURN, distance_str),
        )
    } else if sample.distance_m < params.continue_distance_m {
        (
            BackgroundCategory::Default,
            format!("{} Continue for {}", ICON_CONTINUE, distance_str),
        )
    } else {
        (
            BackgroundCategory::Default,
            format!("{} {} away", ICON_AWAY, distance_str),
        )
    };

    DisplayState {
        banner_visible: true,
        primary_text: sample.instruction.clone(),
        secondary_text,
        background,
    }
}

/// Format a distance for display.
///
/// Below a kilometer whole meters are shown (`"950m"`), above it kilometers
/// with one truncated decimal (`"1.9km"`).
pub fn format_distance(distance_m: f64) -> String {
    if distance_m < 1000.0 {
        format!("{}m", distance_m as i64)
    } else {
        format!(
            "{}.{}km",
            (distance_m / 1000.0) as i64,
            ((distance_m % 1000.0) / 100.0) as i64
        )
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn display_for(distance_m: f64, is_final_step: bool) -> DisplayState {
        let sample = NavSample {
            distance_m,
            bearing_deg: 0.0,
            instruction: String::from("Keep left"),
            is_final_step,
        };
        calc_display(&sample, &Params::default())
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(30.7), "30m");
        assert_eq!(format_distance(950.0), "950m");
        assert_eq!(format_distance(999.9), "999m");
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(1950.0), "1.9km");
        assert_eq!(format_distance(12_345.0), "12.3km");
    }

    #[test]
    fn test_categories() {
        let d = display_for(30.0, false);
        assert_eq!(d.background, BackgroundCategory::NearTurn);
        assert_eq!(d.secondary_text, "🔄 Turn ahead in 30m");

        let d = display_for(120.0, false);
        assert_eq!(d.background, BackgroundCategory::Default);
        assert_eq!(d.secondary_text, "⬆️ Continue for 120m");

        let d = display_for(1950.0, false);
        assert_eq!(d.background, BackgroundCategory::Default);
        assert_eq!(d.secondary_text, "📍 1.9km away");

        assert!(d.banner_visible);
        assert_eq!(d.primary_text, "Keep left");
    }

    #[test]
    fn test_final_step_always_destination() {
        for distance_m in [0.0, 30.0, 120.0, 5000.0].iter() {
            let d = display_for(*distance_m, true);
            assert_eq!(d.background, BackgroundCategory::Destination);
            assert_eq!(d.secondary_text, "🏁 Destination");
        }
    }
}
