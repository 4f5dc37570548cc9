use std::collections::BTreeMap;

use chrono::Weekday;
use rand::{Rng, seq::SliceRandom};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A program track a user can follow. The slug doubles as the stored fitness goal.
#[derive(Display, EnumIter, EnumString, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    #[strum(to_string = "active-lifestyle")]
    ActiveLifestyle,
}

impl Program {
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Program::ActiveLifestyle => "Active Lifestyle",
        }
    }

    #[must_use]
    pub fn pool(self) -> &'static [Workout] {
        match self {
            Program::ActiveLifestyle => ACTIVE_LIFESTYLE,
        }
    }

    #[must_use]
    pub fn is_rest_day(self, day: Weekday) -> bool {
        match self {
            Program::ActiveLifestyle => matches!(day, Weekday::Wed | Weekday::Sun),
        }
    }

    /// Number of workouts assigned to a training day.
    #[must_use]
    pub fn workouts_per_day(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Program::ActiveLifestyle => 5..=7,
        }
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTier {
    #[strum(to_string = "Light Weight")]
    Light,
    #[strum(to_string = "Moderate Weight")]
    Moderate,
    #[strum(to_string = "Heavy Weight")]
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub title: &'static str,
    /// Target muscles and volume, one item per line.
    pub subtitle: &'static str,
    pub video: &'static str,
    pub load: LoadTier,
}

const ACTIVE_LIFESTYLE: &[Workout] = &[
    Workout {
        title: "Brisk Walking",
        subtitle: "Target: Cardio\n3 sets of 60 seconds",
        video: "/videos/active-lifestyle/briskwalk.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Bodyweight Squats",
        subtitle: "Target: Quads, Glutes\n3 sets of 12 reps",
        video: "/videos/active-lifestyle/bodysquat.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Push-ups",
        subtitle: "Target: Chest, Triceps\n3 sets of 10 reps",
        video: "/videos/active-lifestyle/pushup.mp4",
        load: LoadTier::Moderate,
    },
    Workout {
        title: "Standing Calf Raise",
        subtitle: "Target: Calves\n3 sets of 12 reps",
        video: "/videos/active-lifestyle/calfraise.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Jogging",
        subtitle: "Target: Cardio\n1 set of 15-30 mins",
        video: "/videos/active-lifestyle/jog.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Lunges",
        subtitle: "Target: Quads, Glutes\n3 sets of 10 reps",
        video: "/videos/active-lifestyle/lunges.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Incline Push-ups",
        subtitle: "Target: Chest, Triceps\n3 sets of 10 reps",
        video: "/videos/active-lifestyle/inclinepushup.mp4",
        load: LoadTier::Moderate,
    },
    Workout {
        title: "Standing Side Leg Raise",
        subtitle: "Target: Hips\n3 sets of 10 reps",
        video: "/videos/active-lifestyle/standingside.mp4",
        load: LoadTier::Light,
    },
    Workout {
        title: "Step-ups",
        subtitle: "Target: Quads, Glutes\n3 sets of 10 reps",
        video: "/videos/active-lifestyle/stepup.mp4",
        load: LoadTier::Light,
    },
];

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Workouts assigned to each day of the week.
///
/// The assignment is drawn once and kept for the lifetime of the application; it is not
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub program: Program,
    days: BTreeMap<u32, Vec<Workout>>,
}

impl WorkoutPlan {
    pub fn generate(program: Program, rng: &mut impl Rng) -> Self {
        let days = WEEK
            .iter()
            .map(|&day| {
                let workouts = if program.is_rest_day(day) {
                    vec![]
                } else {
                    let count = rng
                        .gen_range(program.workouts_per_day())
                        .min(program.pool().len());
                    program
                        .pool()
                        .choose_multiple(&mut *rng, count)
                        .cloned()
                        .collect()
                };
                (day.num_days_from_monday(), workouts)
            })
            .collect();
        Self { program, days }
    }

    #[must_use]
    pub fn workouts(&self, day: Weekday) -> &[Workout] {
        self.days
            .get(&day.num_days_from_monday())
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_rest_day(&self, day: Weekday) -> bool {
        self.workouts(day).is_empty()
    }
}
