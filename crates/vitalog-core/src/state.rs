use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::CategoryFilter;
use crate::range::{Direction, Granularity, step};

/// Everything a dashboard surface needs to render: the anchor date, the
/// view granularity, the category tab, and which detail panel (if any)
/// is expanded. Plain data, serializable, no behavior of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub reference_date: NaiveDate,
    pub granularity: Granularity,
    pub category: CategoryFilter,
    pub expanded: Option<Uuid>,
}

impl DashboardState {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            granularity: Granularity::Week,
            category: CategoryFilter::All,
            expanded: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    PrevPeriod,
    NextPeriod,
    JumpTo(NaiveDate),
    SetGranularity(Granularity),
    SetCategory(CategoryFilter),
    ToggleDetail(Uuid),
}

/// Pure transition function: the host applies each user interaction here
/// and re-renders from the returned state. Navigation delegates to
/// `range::step`; toggling an already-expanded detail collapses it.
pub fn reduce(state: DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::PrevPeriod => DashboardState {
            reference_date: step(state.reference_date, state.granularity, Direction::Prev),
            ..state
        },
        DashboardEvent::NextPeriod => DashboardState {
            reference_date: step(state.reference_date, state.granularity, Direction::Next),
            ..state
        },
        DashboardEvent::JumpTo(date) => DashboardState {
            reference_date: date,
            ..state
        },
        DashboardEvent::SetGranularity(granularity) => DashboardState {
            granularity,
            ..state
        },
        DashboardEvent::SetCategory(category) => DashboardState {
            category,
            expanded: None,
            ..state
        },
        DashboardEvent::ToggleDetail(id) => DashboardState {
            expanded: if state.expanded == Some(id) {
                None
            } else {
                Some(id)
            },
            ..state
        },
    }
}
