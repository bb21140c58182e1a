//! Sorted views over the patient collection.

use std::cmp::Ordering;

use crate::error::ServiceError;
use crate::patient::PatientView;
use crate::storage::Collection;

/// Fields a sorted view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    /// Case-insensitive; anything outside the sortable set is rejected.
    pub fn parse(raw: &str) -> Result<SortField, ServiceError> {
        match raw.to_ascii_lowercase().as_str() {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(ServiceError::InvalidQuery(
                "Invalid sort field. Valid fields are: height, weight, bmi".to_string(),
            )),
        }
    }

    fn key(&self, view: &PatientView) -> f64 {
        match self {
            SortField::Height => view.height,
            SortField::Weight => view.weight,
            SortField::Bmi => view.bmi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Exact match only: `asc` or `desc`.
    pub fn parse(raw: &str) -> Result<SortOrder, ServiceError> {
        match raw {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ServiceError::InvalidQuery(
                "Invalid order. Use 'asc' or 'desc'".to_string(),
            )),
        }
    }
}

/// Materializes every record's full view and orders it by the requested
/// field.
///
/// The sort is stable in both directions: records with equal keys keep the
/// collection's insertion order. The ordering is reversed per comparison,
/// never by reversing the result.
pub fn sorted_view(
    collection: &Collection,
    sort_by: &str,
    order: &str,
) -> Result<Vec<PatientView>, ServiceError> {
    let field = SortField::parse(sort_by)?;
    let order = SortOrder::parse(order)?;

    let mut views: Vec<PatientView> = collection.values().map(|record| record.view()).collect();

    views.sort_by(|a, b| {
        let ordering = field
            .key(a)
            .partial_cmp(&field.key(b))
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    Ok(views)
}
