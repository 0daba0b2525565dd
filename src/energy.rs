use crate::profile::{ActivityLevel, Profile};

/// Daily target used whenever age, height or weight is unknown.
pub const DEFAULT_DAILY_TARGET_KCAL: u32 = 2000;
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.55;

/// Activity multiplier applied on top of the basal rate. A missing level counts as moderate.
pub fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    match level {
        Some(ActivityLevel::Sedentary) => 1.2,
        Some(ActivityLevel::Light) => 1.375,
        Some(ActivityLevel::Moderate) => 1.55,
        Some(ActivityLevel::Active) => 1.725,
        Some(ActivityLevel::Extra) => 1.9,
        None => DEFAULT_ACTIVITY_MULTIPLIER,
    }
}

/// Same table keyed by the raw string; unrecognized strings get the default.
pub fn activity_multiplier_for(level: &str) -> f64 {
    activity_multiplier(ActivityLevel::parse_lenient(level))
}

/// Mifflin-St Jeor with the +5 constant applied to every profile.
pub fn basal_metabolic_rate(age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + 5.0
}

/// Calculates the daily energy target (kcal/day) for a profile.
///
/// Returns [`DEFAULT_DAILY_TARGET_KCAL`] when the profile lacks age, height or
/// weight, and also when the arithmetic lands on a non-positive value, so the
/// result is always a positive integer.
pub fn estimate_daily_target(profile: &Profile) -> u32 {
    let (age, height_cm, weight_kg) = match (profile.age, profile.height_cm, profile.weight_kg) {
        (Some(a), Some(h), Some(w)) => (a, h, w),
        _ => return DEFAULT_DAILY_TARGET_KCAL,
    };

    let bmr = basal_metabolic_rate(age, height_cm, weight_kg);
    let target = (bmr * activity_multiplier(profile.activity_level)).round();

    if target.is_finite() && target >= 1.0 && target <= f64::from(u32::MAX) {
        target as u32
    } else {
        DEFAULT_DAILY_TARGET_KCAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        age: Option<u32>,
        height: Option<f64>,
        weight: Option<f64>,
        level: Option<ActivityLevel>,
    ) -> Profile {
        Profile {
            age,
            height_cm: height,
            weight_kg: weight,
            activity_level: level,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_profile_target() {
        // 10*70 + 6.25*170 - 5*30 + 5 = 1617.5; * 1.55 = 2507.125
        let p = profile(Some(30), Some(170.0), Some(70.0), Some(ActivityLevel::Moderate));
        assert_eq!(basal_metabolic_rate(30, 170.0, 70.0), 1617.5);
        assert_eq!(estimate_daily_target(&p), 2507);
    }

    #[test]
    fn test_missing_metrics_use_default() {
        let missing_age = profile(None, Some(170.0), Some(70.0), Some(ActivityLevel::Extra));
        let missing_height = profile(Some(30), None, Some(70.0), Some(ActivityLevel::Extra));
        let missing_weight = profile(Some(30), Some(170.0), None, Some(ActivityLevel::Extra));
        assert_eq!(estimate_daily_target(&missing_age), 2000);
        assert_eq!(estimate_daily_target(&missing_height), 2000);
        assert_eq!(estimate_daily_target(&missing_weight), 2000);
        assert_eq!(estimate_daily_target(&Profile::default()), 2000);
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(activity_multiplier_for("sedentary"), 1.2);
        assert_eq!(activity_multiplier_for("light"), 1.375);
        assert_eq!(activity_multiplier_for("moderate"), 1.55);
        assert_eq!(activity_multiplier_for("active"), 1.725);
        assert_eq!(activity_multiplier_for("extra"), 1.9);
        assert_eq!(activity_multiplier_for("marathon every day"), 1.55);
        assert_eq!(activity_multiplier_for(""), 1.55);
        assert_eq!(activity_multiplier(None), 1.55);
    }

    #[test]
    fn test_missing_activity_counts_as_moderate() {
        let with_level = profile(Some(45), Some(160.0), Some(60.0), Some(ActivityLevel::Moderate));
        let without_level = profile(Some(45), Some(160.0), Some(60.0), None);
        assert_eq!(estimate_daily_target(&with_level), estimate_daily_target(&without_level));
    }

    #[test]
    fn test_sedentary_target() {
        // bmr = 600 + 1000 - 250 + 5 = 1355; * 1.2 = 1626
        let p = profile(Some(50), Some(160.0), Some(60.0), Some(ActivityLevel::Sedentary));
        assert_eq!(estimate_daily_target(&p), 1626);
    }

    #[test]
    fn test_absurd_inputs_stay_positive() {
        let p = profile(Some(120), Some(1.0), Some(1.0), Some(ActivityLevel::Sedentary));
        assert_eq!(estimate_daily_target(&p), DEFAULT_DAILY_TARGET_KCAL);
    }

    #[test]
    fn test_valid_profiles_are_positive() {
        for age in [18u32, 35, 60, 90] {
            for height in [150.0, 175.0, 200.0] {
                for weight in [45.0, 80.0, 130.0] {
                    let level = Some(ActivityLevel::Light);
                    let p = profile(Some(age), Some(height), Some(weight), level);
                    assert!(estimate_daily_target(&p) > 0);
                }
            }
        }
    }
}
