use crate::models::{FeePreference, SchoolRecord, ScoreWeights, StudentProfile};

/// Fee ceiling for the "low" preference band, in rupees.
pub const LOW_FEE_MAX: f64 = 500.0;
/// Fee ceiling for the "medium" preference band, in rupees.
pub const MEDIUM_FEE_MAX: f64 = 1500.0;

/// Calculate a suitability score (0-120 with default weights) for a school
/// against a student profile
///
/// Additive point system, one check per criterion:
/// - class offered          -> +30
/// - location substring     -> +20
/// - school type            -> +20
/// - within max distance    -> +20
/// - fee inside chosen band -> +20
/// - midday meal scheme     -> +5
/// - girl-child scheme      -> +5
///
/// Every criterion is independent and total: a field that is absent or of
/// the wrong type simply contributes zero points, never an error.
pub fn calculate_score(
    school: &SchoolRecord,
    profile: &StudentProfile,
    weights: &ScoreWeights,
) -> u32 {
    let mut score = 0;

    if class_matches(school, profile) {
        score += weights.class;
    }
    if location_matches(school, profile) {
        score += weights.location;
    }
    if type_matches(school, profile) {
        score += weights.school_type;
    }
    if distance_fits(school, profile) {
        score += weights.distance;
    }
    if fee_fits(school, profile) {
        score += weights.fee;
    }
    if profile.midday_meal && school.midday == Some(true) {
        score += weights.midday_meal;
    }
    if profile.girl_child && school.girl_support == Some(true) {
        score += weights.girl_child;
    }

    score
}

/// Requested class offered by the school. Both sides are already
/// string-normalized, so numeric and string labels compare equal.
#[inline]
fn class_matches(school: &SchoolRecord, profile: &StudentProfile) -> bool {
    match &profile.class {
        Some(class) => school.classes.contains_class(class),
        None => false,
    }
}

/// Case-insensitive substring match on the free-text location.
#[inline]
fn location_matches(school: &SchoolRecord, profile: &StudentProfile) -> bool {
    match (&school.location, &profile.location) {
        (Some(school_loc), Some(wanted)) => {
            school_loc.to_lowercase().contains(&wanted.to_lowercase())
        }
        _ => false,
    }
}

/// Case-insensitive exact match on the school category.
#[inline]
fn type_matches(school: &SchoolRecord, profile: &StudentProfile) -> bool {
    match (&school.school_type, &profile.school_type) {
        (Some(school_type), Some(wanted)) => {
            school_type.to_lowercase() == wanted.to_lowercase()
        }
        _ => false,
    }
}

/// School within the profile's distance bound. The school-side field must
/// be strictly numeric; upstream sometimes holds junk strings there.
#[inline]
fn distance_fits(school: &SchoolRecord, profile: &StudentProfile) -> bool {
    match (school.distance_km, profile.max_distance_km) {
        (Some(distance), Some(max)) => distance <= max,
        _ => false,
    }
}

/// Fee inside the requested band: free == 0, low <= 500, medium <= 1500.
#[inline]
fn fee_fits(school: &SchoolRecord, profile: &StudentProfile) -> bool {
    let Some(fee) = school.fee else {
        return false;
    };
    match profile.fee_preference() {
        Some(FeePreference::Free) => fee == 0.0,
        Some(FeePreference::Low) => fee <= LOW_FEE_MAX,
        Some(FeePreference::Medium) => fee <= MEDIUM_FEE_MAX,
        None => false,
    }
}
