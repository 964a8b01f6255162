use crate::core::fuzzy::normalize;
use crate::models::{FilterCriteria, RecipeCombination};

/// Check if a combination row survives the user's preference criteria
///
/// Every criteria field that is present must match; unset fields are
/// wildcards and do not constrain the row. The appliance criterion is a set
/// and matches rows whose appliance is any member.
#[inline]
pub fn matches_criteria(row: &RecipeCombination, criteria: &FilterCriteria) -> bool {
    if let Some(meal_type) = criteria.meal_type {
        if row.meal_type != meal_type {
            return false;
        }
    }

    if let Some(taste_profile) = criteria.taste_profile {
        if row.taste_profile != taste_profile {
            return false;
        }
    }

    if let Some(cook_time) = criteria.cook_time_minutes {
        if row.cook_time_minutes != cook_time {
            return false;
        }
    }

    if !criteria.appliances.is_empty() {
        let appliance = normalize(&row.appliance);
        if !criteria
            .appliances
            .iter()
            .any(|candidate| normalize(candidate) == appliance)
        {
            return false;
        }
    }

    true
}

/// Check if a row carries every requested dietary tag
///
/// An empty restriction list accepts every row.
#[inline]
pub fn matches_dietary(row: &RecipeCombination, restrictions: &[String]) -> bool {
    restrictions.iter().all(|restriction| {
        let restriction = normalize(restriction);
        row.dietary_tags
            .iter()
            .any(|tag| normalize(tag) == restriction)
    })
}
