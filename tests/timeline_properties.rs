// tests/timeline_properties.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use taskplanner::plan::Task;
use taskplanner::timeline::{schedule, Timeline};
use taskplanner_test_utils::builders::TaskBuilder;

// Plans of up to `max_tasks` tasks named t0..tN. Dependencies point at any
// index, including unknown names, so forward references and dangling
// references both occur.
fn plan_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec(
        (
            -2i64..10,
            proptest::collection::vec(0..(max_tasks + 2), 0..4),
        ),
        0..=max_tasks,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (days, deps))| {
                let mut builder = TaskBuilder::new(&format!("t{i}")).days(days);
                for dep in deps {
                    builder = builder.after(&format!("t{dep}"));
                }
                builder.build()
            })
            .collect()
    })
}

fn today_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn end_date_spans_effective_duration(tasks in plan_strategy(12), today in today_strategy()) {
        for t in schedule(&tasks, today) {
            let span = (t.end_date - t.start_date).num_days() + 1;
            prop_assert_eq!(span as u64, t.days);
            prop_assert_eq!(t.days, t.task.effective_duration_days());
            prop_assert!(t.days >= 1);
        }
    }

    #[test]
    fn start_follows_latest_placed_dependency(tasks in plan_strategy(12), today in today_strategy()) {
        let scheduled = schedule(&tasks, today);
        let mut placed: HashMap<&str, NaiveDate> = HashMap::new();

        for t in &scheduled {
            let latest = t
                .task
                .depends_on
                .iter()
                .filter_map(|d| placed.get(d.as_str()).copied())
                .max();
            match latest {
                Some(end) => {
                    prop_assert_eq!(t.start_date, end.succ_opt().unwrap());
                }
                None => {
                    prop_assert_eq!(t.start_date, today);
                }
            }
            placed.insert(t.name(), t.end_date);
        }
    }

    #[test]
    fn output_is_a_stable_sort_by_dependency_count(tasks in plan_strategy(12), today in today_strategy()) {
        let scheduled = schedule(&tasks, today);
        prop_assert_eq!(scheduled.len(), tasks.len());

        for pair in scheduled.windows(2) {
            prop_assert!(pair[0].level <= pair[1].level);
        }
        for (i, t) in scheduled.iter().enumerate() {
            prop_assert_eq!(t.level, t.task.depends_on.len());
            prop_assert_eq!(t.color_index, i % 12);
            prop_assert!(t.start_date >= today);
        }
    }

    #[test]
    fn scheduling_is_idempotent(tasks in plan_strategy(12), today in today_strategy()) {
        prop_assert_eq!(Timeline::build(&tasks, today), Timeline::build(&tasks, today));
    }

    #[test]
    fn summary_covers_every_task(tasks in plan_strategy(12), today in today_strategy()) {
        let timeline = Timeline::build(&tasks, today);
        match timeline.summary.project_end_date {
            None => {
                prop_assert!(tasks.is_empty());
                prop_assert_eq!(timeline.summary.total_days, 0);
            }
            Some(end) => {
                prop_assert!(timeline.tasks.iter().all(|t| t.end_date <= end));
                prop_assert_eq!(timeline.summary.total_days, (end - today).num_days() + 1);
            }
        }
    }
}
