//! League table ordering.

use std::cmp::Ordering;

use crate::domain::Team;

/// Total order over teams: points, then goal difference, then goals for, all
/// descending, with name ascending as the final tie-break. Strict for unique names;
/// duplicate names degrade to the (stable) sort's input order.
pub fn compare(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_diff().cmp(&a.goal_diff()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts the teams into table order.
pub fn table<'a>(teams: impl IntoIterator<Item = &'a Team>) -> Vec<&'a Team> {
    let mut table: Vec<&Team> = teams.into_iter().collect();
    table.sort_by(|a, b| compare(a, b));
    table
}
