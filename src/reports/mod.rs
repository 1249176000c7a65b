pub mod avg_issues_dev_bar;
pub mod created_closed_bar;
pub mod critical_ratio_bar;
pub mod cycle_waiting_bar;
pub mod developer_tickets_bar;
pub mod gantt_timeline;
pub mod integration_priority_bar;
pub mod integration_time_bar;

/// Distinct values in first-seen order.
pub(crate) fn ordered_unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_order() {
        let values = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(ordered_unique(values), ["b", "a", "c"]);
    }
}
