use serde::{Deserialize, Serialize};

use super::hospital::Hospital;

/// Filter panel values. `None` means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HospitalFilters {
    pub department: Option<String>,
    pub service: Option<String>,
    pub min_rating: Option<f64>,
}

fn contains_ignore_case(items: &[String], wanted: &str) -> bool {
    let wanted = wanted.trim();
    wanted.is_empty() || items.iter().any(|item| item.trim().eq_ignore_ascii_case(wanted))
}

impl HospitalFilters {
    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.service.is_none() && self.min_rating.is_none()
    }

    pub fn matches(&self, hospital: &Hospital) -> bool {
        let department = self
            .department
            .as_deref()
            .map_or(true, |d| contains_ignore_case(&hospital.departments, d));
        let service = self
            .service
            .as_deref()
            .map_or(true, |s| contains_ignore_case(&hospital.available_services, s));
        let rating = self
            .min_rating
            .map_or(true, |min| hospital.ratings.is_some_and(|r| r >= min));

        department && service && rating
    }
}
